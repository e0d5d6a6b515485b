#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::slice;

use canopy_core::{Behavior, Node, Status, StatusSink, TickContext};

pub struct Inverter<A>
where
    A: 'static,
{
    child: Node<A>,
}

impl<A> Inverter<A>
where
    A: 'static,
{
    pub fn new(child: Node<A>) -> Self {
        Self { child }
    }
}

impl<A> Clone for Inverter<A>
where
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            child: self.child.clone(),
        }
    }
}

impl<A> Behavior<A> for Inverter<A>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A, sink: &mut dyn StatusSink) -> Status {
        self.child.tick(ctx, agent, sink).invert()
    }

    fn kind(&self) -> &'static str {
        "inverter"
    }

    fn children(&self) -> &[Node<A>] {
        slice::from_ref(&self.child)
    }

    fn children_mut(&mut self) -> &mut [Node<A>] {
        slice::from_mut(&mut self.child)
    }
}

/// What a [`Repeater`] does with a failing child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RetryRepr", into = "RetryRepr"))]
pub enum RetryPolicy {
    /// Failure propagates.
    #[default]
    Never,
    /// Up to `n` failures per activation are retried; the next one propagates.
    Limited(u32),
    /// Failure is never surfaced; the child is restarted until it succeeds.
    Forever,
}

/// Written as a retry count or as `never` / `forever`.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RetryRepr {
    Limited(u32),
    Keyword(RetryKeyword),
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RetryKeyword {
    Never,
    Forever,
}

#[cfg(feature = "serde")]
impl From<RetryRepr> for RetryPolicy {
    fn from(repr: RetryRepr) -> Self {
        match repr {
            RetryRepr::Limited(n) => RetryPolicy::Limited(n),
            RetryRepr::Keyword(RetryKeyword::Never) => RetryPolicy::Never,
            RetryRepr::Keyword(RetryKeyword::Forever) => RetryPolicy::Forever,
        }
    }
}

#[cfg(feature = "serde")]
impl From<RetryPolicy> for RetryRepr {
    fn from(policy: RetryPolicy) -> Self {
        match policy {
            RetryPolicy::Never => RetryRepr::Keyword(RetryKeyword::Never),
            RetryPolicy::Limited(n) => RetryRepr::Limited(n),
            RetryPolicy::Forever => RetryRepr::Keyword(RetryKeyword::Forever),
        }
    }
}

/// Keeps restarting its child until it succeeds, within the limits of a [`RetryPolicy`].
///
/// A retried failure reports `Running`, and the child is re-activated on the next tick.
pub struct Repeater<A>
where
    A: 'static,
{
    child: Node<A>,
    policy: RetryPolicy,
    failures: u32,
}

impl<A> Repeater<A>
where
    A: 'static,
{
    pub fn new(child: Node<A>) -> Self {
        Self::with_policy(child, RetryPolicy::Never)
    }

    pub fn until_success(child: Node<A>) -> Self {
        Self::with_policy(child, RetryPolicy::Forever)
    }

    pub fn with_policy(child: Node<A>, policy: RetryPolicy) -> Self {
        Self {
            child,
            policy,
            failures: 0,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Child failures seen during the current activation.
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

impl<A> Clone for Repeater<A>
where
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            child: self.child.clone(),
            policy: self.policy,
            failures: self.failures,
        }
    }
}

impl<A> Behavior<A> for Repeater<A>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A, sink: &mut dyn StatusSink) -> Status {
        match self.child.tick(ctx, agent, sink) {
            Status::Success => Status::Success,
            Status::Running => Status::Running,
            Status::Failure => {
                self.failures = self.failures.saturating_add(1);
                let retry = match self.policy {
                    RetryPolicy::Never => false,
                    RetryPolicy::Limited(max) => self.failures <= max,
                    RetryPolicy::Forever => true,
                };
                if retry {
                    Status::Running
                } else {
                    Status::Failure
                }
            }
        }
    }

    fn reset(&mut self, _ctx: &TickContext, _agent: &mut A) {
        self.failures = 0;
    }

    fn kind(&self) -> &'static str {
        "repeater"
    }

    fn children(&self) -> &[Node<A>] {
        slice::from_ref(&self.child)
    }

    fn children_mut(&mut self) -> &mut [Node<A>] {
        slice::from_mut(&mut self.child)
    }
}
