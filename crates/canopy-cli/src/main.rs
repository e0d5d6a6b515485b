//! canopy CLI.
//!
//! - `canopy validate <tree>` - parse and build a tree definition
//! - `canopy dump <tree>` - print the numbered node outline
//! - `canopy run <tree>` - tick the tree against a demo agent until it exits

mod agent;
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use canopy::{Controller, Node, Status, TreeDef};
use clap::{Parser, Subcommand};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{fmt, EnvFilter};

use agent::DemoAgent;
use config::RunConfig;

#[derive(Parser)]
#[command(name = "canopy")]
#[command(about = "Behavior tree runner", version)]
struct Cli {
    /// Run configuration file (defaults to ./canopy.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a tree definition parses and all called methods exist
    Validate { tree: PathBuf },

    /// Print the tree with node ids
    Dump { tree: PathBuf },

    /// Run a tree against the demo agent
    Run {
        tree: PathBuf,

        /// Override the configured tick budget
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Override the configured tick interval
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Pace ticks in wall-clock time
        #[arg(long)]
        realtime: bool,

        /// Print every node status recorded during each tick
        #[arg(long)]
        trace: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Validate { tree } => {
            let root = build_tree(&tree)?;
            println!("{}: ok ({} nodes)", tree.display(), root.node_count());
            Ok(())
        }
        Commands::Dump { tree } => {
            let mut root = build_tree(&tree)?;
            root.assign_ids();
            print!("{}", outline(&root));
            Ok(())
        }
        Commands::Run {
            tree,
            max_ticks,
            interval_ms,
            realtime,
            trace,
        } => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            let mut config = RunConfig::discover(cli.config.as_deref(), &cwd)?;
            if let Some(n) = max_ticks {
                config.max_ticks = n;
            }
            if let Some(ms) = interval_ms {
                config.interval_ms = ms;
            }
            config.realtime |= realtime;
            config.validate()?;
            run_tree(&tree, &config, trace).await
        }
    }
}

fn load_tree(path: &Path) -> Result<TreeDef> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree from {}", path.display()))?;
    let def = if path.extension().is_some_and(|ext| ext == "json") {
        TreeDef::from_json(&content)
    } else {
        TreeDef::from_yaml(&content)
    };
    def.with_context(|| format!("Failed to parse tree from {}", path.display()))
}

fn build_tree(path: &Path) -> Result<Node<DemoAgent>> {
    let def = load_tree(path)?;
    def.build(&agent::bindings())
        .with_context(|| format!("Failed to build tree from {}", path.display()))
}

fn outline<A: 'static>(root: &Node<A>) -> String {
    let mut out = String::new();
    root.walk(&mut |node, depth| {
        let indent = "  ".repeat(depth);
        match node.label() {
            Some(label) => out.push_str(&format!("{indent}{} {} \"{label}\"\n", node.id(), node.kind())),
            None => out.push_str(&format!("{indent}{} {}\n", node.id(), node.kind())),
        }
    });
    out
}

async fn run_tree(path: &Path, config: &RunConfig, trace: bool) -> Result<()> {
    let root = build_tree(path)?;
    let mut controller = Controller::new(root, config.controller());
    let mut agent = DemoAgent::new(&config.agent);

    tracing::info!(
        tree = %path.display(),
        interval_ms = config.interval_ms,
        max_ticks = config.max_ticks,
        realtime = config.realtime,
        "Starting behavior tree"
    );

    let mut pacer = config.realtime.then(|| {
        let mut interval = tokio::time::interval(config.interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    controller.start()?;
    let mut status = Status::Running;
    for _ in 0..config.max_ticks {
        if let Some(pacer) = pacer.as_mut() {
            pacer.tick().await;
        }

        status = controller.step(&mut agent)?;
        if trace {
            print_statuses(&controller);
        }
        if let Some(ctx) = controller.last_tick() {
            agent.advance(&ctx);
        }
        if status.is_terminal() {
            break;
        }
    }

    let position = agent.follower.position();
    println!(
        "{status} after {} ticks; {} events; agent at ({:.2}, {:.2})",
        controller.ticks(),
        agent.events.len(),
        position.x,
        position.y
    );

    match status {
        Status::Success => Ok(()),
        Status::Failure => anyhow::bail!("behavior tree failed"),
        Status::Running => anyhow::bail!("behavior tree still running after {} ticks", config.max_ticks),
    }
}

fn print_statuses(controller: &Controller<DemoAgent>) {
    let Some(root) = controller.root() else {
        return;
    };
    let tick = controller.last_tick().map_or(0, |ctx| ctx.tick);
    for (id, status) in controller.statuses().iter() {
        let name = root.find(id).map_or("?", Node::name);
        println!("[{tick}] {id} {name}: {status}");
    }
}
