//! Agent context for `canopy run`.

use canopy::{Bindings, EventTarget, NavAgent, Status, TickContext, Vec2};
use canopy_nav::PathFollower;
use tracing::info;

use crate::config::AgentConfig;

pub struct DemoAgent {
    pub follower: PathFollower,
    pub events: Vec<(u64, String)>,
    tick: u64,
}

impl DemoAgent {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            follower: PathFollower::new(Vec2::from(config.position), config.speed),
            events: Vec::new(),
            tick: 0,
        }
    }

    /// Move the agent by one tick's worth of time.
    pub fn advance(&mut self, ctx: &TickContext) {
        self.follower.advance(ctx.dt_seconds());
        self.tick = ctx.tick + 1;
    }
}

impl EventTarget for DemoAgent {
    fn fire(&mut self, event: &str) {
        info!(tick = self.tick, event, "event fired");
        self.events.push((self.tick, event.to_string()));
    }
}

impl NavAgent for DemoAgent {
    fn set_destination(&mut self, goal: Vec2) -> bool {
        self.follower.set_destination(goal)
    }

    fn remaining_distance(&self) -> Option<f32> {
        self.follower.remaining_distance()
    }

    fn stop(&mut self) {
        self.follower.stop();
    }
}

/// Methods `call` nodes can name.
pub fn bindings() -> Bindings<DemoAgent> {
    Bindings::new()
        .with("succeed", |_: &TickContext, _: &mut DemoAgent| Status::Success)
        .with("fail", |_: &TickContext, _: &mut DemoAgent| Status::Failure)
        .with("running", |_: &TickContext, _: &mut DemoAgent| Status::Running)
        .with("log_position", |ctx: &TickContext, agent: &mut DemoAgent| {
            let p = agent.follower.position();
            info!(tick = ctx.tick, x = p.x, y = p.y, "agent position");
            Status::Success
        })
}
