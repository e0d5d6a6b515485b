use std::borrow::Cow;
use std::time::Duration;

use canopy_core::{Behavior, Status, StatusSink, TickContext};
use canopy_nav::{NavAgent, Vec2};

/// Default arrival distance for [`MoveTo`].
pub const ARRIVAL_EPSILON: f32 = 0.1;

/// Event capability an agent context exposes to [`FireEvent`].
pub trait EventTarget {
    fn fire(&mut self, event: &str);
}

/// Succeeds once `duration` has elapsed since activation.
///
/// Elapsed time is the sum of `dt` over the ticks of the activation, including the first one.
#[derive(Debug, Clone)]
pub struct Wait {
    duration: Duration,
    elapsed: Duration,
}

impl Wait {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<A> Behavior<A> for Wait
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, _agent: &mut A, _sink: &mut dyn StatusSink) -> Status {
        self.elapsed += ctx.dt;
        if self.elapsed >= self.duration {
            Status::Success
        } else {
            Status::Running
        }
    }

    fn reset(&mut self, _ctx: &TickContext, _agent: &mut A) {
        self.elapsed = Duration::ZERO;
    }

    fn kind(&self) -> &'static str {
        "wait"
    }
}

/// Fires an event on the agent and succeeds in the same tick.
#[derive(Debug, Clone)]
pub struct FireEvent {
    event: Cow<'static, str>,
}

impl FireEvent {
    pub fn new(event: impl Into<Cow<'static, str>>) -> Self {
        Self {
            event: event.into(),
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }
}

impl<A> Behavior<A> for FireEvent
where
    A: EventTarget + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: &mut A, _sink: &mut dyn StatusSink) -> Status {
        agent.fire(&self.event);
        Status::Success
    }

    fn kind(&self) -> &'static str {
        "fire_event"
    }
}

/// Drives a [`NavAgent`] toward a target.
///
/// The destination is issued on the first tick of each activation. Fails when the target is
/// unset, the destination is refused, or the agent loses its path.
#[derive(Debug, Clone)]
pub struct MoveTo {
    target: Option<Vec2>,
    epsilon: f32,
    issued: bool,
}

impl MoveTo {
    pub fn new(target: Option<Vec2>) -> Self {
        Self {
            target,
            epsilon: ARRIVAL_EPSILON,
            issued: false,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Takes effect on the next activation.
    pub fn set_target(&mut self, target: Option<Vec2>) {
        self.target = target;
    }
}

impl<A> Behavior<A> for MoveTo
where
    A: NavAgent + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: &mut A, _sink: &mut dyn StatusSink) -> Status {
        let Some(target) = self.target else {
            return Status::Failure;
        };

        if !self.issued {
            if !agent.set_destination(target) {
                return Status::Failure;
            }
            self.issued = true;
        }

        match agent.remaining_distance() {
            None => Status::Failure,
            Some(d) if d <= self.epsilon => Status::Success,
            Some(_) => Status::Running,
        }
    }

    fn reset(&mut self, _ctx: &TickContext, _agent: &mut A) {
        self.issued = false;
    }

    fn on_success(&mut self, agent: &mut A) {
        agent.stop();
    }

    fn on_failure(&mut self, agent: &mut A) {
        if self.issued {
            agent.stop();
        }
    }

    fn cancel(&mut self, agent: &mut A) {
        agent.stop();
    }

    fn kind(&self) -> &'static str {
        "move_to"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Succeed;

impl<A> Behavior<A> for Succeed
where
    A: 'static,
{
    fn tick(&mut self, _ctx: &TickContext, _agent: &mut A, _sink: &mut dyn StatusSink) -> Status {
        Status::Success
    }

    fn kind(&self) -> &'static str {
        "succeed"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Fail;

impl<A> Behavior<A> for Fail
where
    A: 'static,
{
    fn tick(&mut self, _ctx: &TickContext, _agent: &mut A, _sink: &mut dyn StatusSink) -> Status {
        Status::Failure
    }

    fn kind(&self) -> &'static str {
        "fail"
    }
}

/// Delegates the tick to an externally supplied method.
///
/// Clones share the callable; any state it needs should live in the agent context.
#[derive(Clone)]
pub struct Call<F> {
    method: F,
}

impl<F> Call<F> {
    pub fn new(method: F) -> Self {
        Self { method }
    }
}

impl<A, F> Behavior<A> for Call<F>
where
    A: 'static,
    F: Fn(&TickContext, &mut A) -> Status + Clone + 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A, _sink: &mut dyn StatusSink) -> Status {
        (self.method)(ctx, agent)
    }

    fn kind(&self) -> &'static str {
        "call"
    }
}

#[derive(Clone)]
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<A, F> Behavior<A> for Condition<F>
where
    A: 'static,
    F: Fn(&TickContext, &A) -> bool + Clone + 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A, _sink: &mut dyn StatusSink) -> Status {
        if (self.cond)(ctx, &*agent) {
            Status::Success
        } else {
            Status::Failure
        }
    }

    fn kind(&self) -> &'static str {
        "condition"
    }
}
