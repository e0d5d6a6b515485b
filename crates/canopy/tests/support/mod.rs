#![allow(dead_code)]

use canopy::{Behavior, EventTarget, Node, Status, StatusSink, TickContext};

#[derive(Debug, Default)]
pub struct Journal {
    pub ticks: Vec<&'static str>,
    pub hooks: Vec<String>,
    pub events: Vec<String>,
}

impl Journal {
    /// Names ticked since the last call.
    pub fn take_ticks(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.ticks)
    }

    pub fn count(&self, hook: &str) -> usize {
        self.hooks.iter().filter(|h| *h == hook).count()
    }
}

impl EventTarget for Journal {
    fn fire(&mut self, event: &str) {
        self.events.push(event.to_string());
    }
}

/// Replays a fixed script of results, sticking on the last one. The script position carries over
/// activations, so `[Running, Success]` means "running once, then succeed forever".
#[derive(Debug, Clone)]
pub struct Scripted {
    name: &'static str,
    script: Vec<Status>,
    at: usize,
}

impl Behavior<Journal> for Scripted {
    fn tick(&mut self, _ctx: &TickContext, agent: &mut Journal, _sink: &mut dyn StatusSink) -> Status {
        agent.ticks.push(self.name);
        let status = self.script[self.at.min(self.script.len() - 1)];
        self.at += 1;
        status
    }

    fn reset(&mut self, _ctx: &TickContext, agent: &mut Journal) {
        agent.hooks.push(format!("reset:{}", self.name));
    }

    fn on_success(&mut self, agent: &mut Journal) {
        agent.hooks.push(format!("success:{}", self.name));
    }

    fn on_failure(&mut self, agent: &mut Journal) {
        agent.hooks.push(format!("failure:{}", self.name));
    }

    fn cancel(&mut self, agent: &mut Journal) {
        agent.hooks.push(format!("cancel:{}", self.name));
    }

    fn kind(&self) -> &'static str {
        "scripted"
    }
}

pub fn scripted(name: &'static str, script: &[Status]) -> Node<Journal> {
    assert!(!script.is_empty(), "script must not be empty");
    Node::new(Scripted {
        name,
        script: script.to_vec(),
        at: 0,
    })
    .with_label(name)
}

pub fn always(name: &'static str, status: Status) -> Node<Journal> {
    scripted(name, &[status])
}

/// Tick `node` once per context, collecting the results.
pub fn tick_n(node: &mut Node<Journal>, journal: &mut Journal, n: usize) -> Vec<Status> {
    canopy::FixedStep::default()
        .take(n)
        .map(|ctx| node.tick(&ctx, journal, &mut canopy::NullStatusSink))
        .collect()
}

pub fn ctx() -> TickContext {
    TickContext::first(canopy::DEFAULT_TICK_INTERVAL)
}
