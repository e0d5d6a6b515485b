#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::Duration;

use canopy_core::{FixedStep, Node, Status, TickContext, TickStatusMap, DEFAULT_TICK_INTERVAL};
use tracing::{debug, info};

use crate::{BtError, Preset, TreeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Time between ticks of the controller's own clock.
    pub interval: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Ticking,
    /// The root returned a terminal status. The controller never restarts on its own.
    Exited(Status),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Last root status; `Running` when the tick budget ran out first.
    pub status: Status,
    pub ticks: u64,
}

type TickObserver = Box<dyn FnMut(&TickContext, &TickStatusMap)>;

/// Owns one tree and ticks it until the root finishes.
pub struct Controller<A>
where
    A: 'static,
{
    config: ControllerConfig,
    clock: FixedStep,
    preset: Option<Rc<Preset<A>>>,
    root: Option<Node<A>>,
    state: ControllerState,
    statuses: TickStatusMap,
    last_tick: Option<TickContext>,
    ticks: u64,
    observer: Option<TickObserver>,
}

impl<A> Controller<A>
where
    A: 'static,
{
    pub fn new(source: impl Into<TreeSource<A>>, config: ControllerConfig) -> Self {
        let mut controller = Self {
            config,
            clock: FixedStep::new(config.interval),
            preset: None,
            root: None,
            state: ControllerState::Idle,
            statuses: TickStatusMap::new(),
            last_tick: None,
            ticks: 0,
            observer: None,
        };
        controller.bind(source.into());
        controller
    }

    pub fn unbound(config: ControllerConfig) -> Self {
        Self::new(TreeSource::Unbound, config)
    }

    /// Invoked after every tick with the statuses recorded during it.
    pub fn on_tick(mut self, observer: impl FnMut(&TickContext, &TickStatusMap) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_exited(&self) -> bool {
        matches!(self.state, ControllerState::Exited(_))
    }

    /// Statuses recorded during the most recent tick. Only meaningful between ticks.
    pub fn statuses(&self) -> &TickStatusMap {
        &self.statuses
    }

    pub fn last_tick(&self) -> Option<TickContext> {
        self.last_tick
    }

    /// Ticks run since the current tree was bound.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The running tree. `None` before a preset-backed controller's first tick.
    pub fn root(&self) -> Option<&Node<A>> {
        self.root.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.root.is_some() || self.preset.is_some()
    }

    pub fn start(&mut self) -> Result<(), BtError> {
        match self.state {
            ControllerState::Exited(status) => Err(BtError::Exited(status)),
            _ if !self.is_bound() => Err(BtError::RootUnset),
            _ => {
                self.state = ControllerState::Ticking;
                Ok(())
            }
        }
    }

    pub fn tick(&mut self, ctx: &TickContext, agent: &mut A) -> Result<Status, BtError> {
        self.ensure_ticking()?;
        self.instantiate_preset();
        let Some(root) = self.root.as_mut() else {
            return Err(BtError::RootUnset);
        };

        self.statuses.clear();
        let status = root.tick(ctx, agent, &mut self.statuses);
        self.last_tick = Some(*ctx);
        self.ticks += 1;
        debug!(tick = ctx.tick, %status, "tree ticked");

        if let Some(observer) = self.observer.as_mut() {
            observer(ctx, &self.statuses);
        }

        if status.is_terminal() {
            self.state = ControllerState::Exited(status);
            info!(tick = ctx.tick, ticks = self.ticks, %status, "behavior tree exited");
        }
        Ok(status)
    }

    /// Tick with the controller's own fixed-interval clock.
    pub fn step(&mut self, agent: &mut A) -> Result<Status, BtError> {
        self.ensure_ticking()?;
        let ctx = self.clock.advance();
        self.tick(&ctx, agent)
    }

    /// Start and step until the tree exits or `max_ticks` ticks have run.
    ///
    /// `between` runs after every tick, which is where the host advances its own world.
    pub fn run<F>(&mut self, agent: &mut A, max_ticks: u64, mut between: F) -> Result<RunOutcome, BtError>
    where
        F: FnMut(&TickContext, &mut A),
    {
        self.start()?;
        let mut status = Status::Running;
        for _ in 0..max_ticks {
            status = self.step(agent)?;
            if let Some(ctx) = self.last_tick {
                between(&ctx, agent);
            }
            if status.is_terminal() {
                break;
            }
        }
        Ok(RunOutcome {
            status,
            ticks: self.ticks,
        })
    }

    /// Cancel in-flight nodes and return to `Idle`. An exited controller stays exited.
    pub fn halt(&mut self, agent: &mut A) {
        if let Some(root) = self.root.as_mut() {
            if root.is_active() {
                debug!(root = root.name(), "halting behavior tree");
            }
            root.cancel(agent);
        }
        if self.state == ControllerState::Ticking {
            self.state = ControllerState::Idle;
        }
    }

    /// Cancel the current tree and bind a new one. The controller goes back to `Idle`, which is
    /// the only way out of `Exited`. The clock and tick count restart with the new tree.
    pub fn replace_source(&mut self, source: impl Into<TreeSource<A>>, agent: &mut A) {
        if let Some(root) = self.root.as_mut() {
            root.cancel(agent);
        }
        self.root = None;
        self.preset = None;
        self.statuses.clear();
        self.clock.restart();
        self.ticks = 0;
        self.last_tick = None;
        self.state = ControllerState::Idle;
        self.bind(source.into());
    }

    fn bind(&mut self, source: TreeSource<A>) {
        match source {
            TreeSource::Unbound => {}
            TreeSource::Root(mut root) => {
                root.assign_ids();
                self.root = Some(root);
            }
            TreeSource::Preset(preset) => self.preset = Some(preset),
        }
    }

    fn instantiate_preset(&mut self) {
        if self.root.is_none() {
            if let Some(preset) = &self.preset {
                self.root = Some(preset.instantiate());
            }
        }
    }

    fn ensure_ticking(&self) -> Result<(), BtError> {
        match self.state {
            ControllerState::Idle => Err(BtError::NotStarted),
            ControllerState::Exited(status) => Err(BtError::Exited(status)),
            ControllerState::Ticking => Ok(()),
        }
    }
}
