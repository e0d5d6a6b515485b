#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::{Status, StatusSink, TickContext};

/// Position of a node in its tree, assigned in pre-order by [`Node::assign_ids`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node logic, generic over the agent context `A` the tree runs against.
///
/// Implementors only decide what a tick does. Activation tracking, completion hooks and status
/// reporting are handled by the owning [`Node`]; composite and decorator behaviors tick their
/// children through `Node::tick` so every child goes through the same lifecycle.
pub trait Behavior<A>: BehaviorClone<A> + 'static
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A, sink: &mut dyn StatusSink) -> Status;

    /// Called once each time the node goes from inactive to active, before `tick`.
    fn reset(&mut self, _ctx: &TickContext, _agent: &mut A) {}

    fn on_success(&mut self, _agent: &mut A) {}

    fn on_failure(&mut self, _agent: &mut A) {}

    /// Called when the node is abandoned while active. Active descendants are cancelled first.
    fn cancel(&mut self, _agent: &mut A) {}

    fn kind(&self) -> &'static str;

    fn children(&self) -> &[Node<A>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Node<A>] {
        &mut []
    }
}

/// Deep clone for boxed behaviors. Implemented for every `Behavior + Clone`.
pub trait BehaviorClone<A> {
    fn clone_box(&self) -> Box<dyn Behavior<A>>;
}

impl<A, T> BehaviorClone<A> for T
where
    A: 'static,
    T: Behavior<A> + Clone,
{
    fn clone_box(&self) -> Box<dyn Behavior<A>> {
        Box::new(self.clone())
    }
}

pub struct Node<A>
where
    A: 'static,
{
    id: NodeId,
    label: Option<Cow<'static, str>>,
    active: bool,
    behavior: Box<dyn Behavior<A>>,
}

impl<A> Node<A>
where
    A: 'static,
{
    pub fn new(behavior: impl Behavior<A>) -> Self {
        Self::from_boxed(Box::new(behavior))
    }

    pub fn from_boxed(behavior: Box<dyn Behavior<A>>) -> Self {
        Self {
            id: NodeId::default(),
            label: None,
            active: false,
            behavior,
        }
    }

    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> &'static str {
        self.behavior.kind()
    }

    /// Label if one was given, kind otherwise.
    pub fn name(&self) -> &str {
        self.label().unwrap_or_else(|| self.kind())
    }

    /// Whether the node is mid-execution across ticks.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn behavior(&self) -> &dyn Behavior<A> {
        self.behavior.as_ref()
    }

    pub fn children(&self) -> &[Node<A>] {
        self.behavior.children()
    }

    pub fn tick(&mut self, ctx: &TickContext, agent: &mut A, sink: &mut dyn StatusSink) -> Status {
        if !self.active {
            self.active = true;
            self.behavior.reset(ctx, agent);
        }

        let status = self.behavior.tick(ctx, agent, sink);
        match status {
            Status::Running => {}
            Status::Success => {
                self.active = false;
                self.behavior.on_success(agent);
            }
            Status::Failure => {
                self.active = false;
                self.behavior.on_failure(agent);
            }
        }

        sink.record(self.id, status);
        status
    }

    /// Abandon an in-flight node. No-op when inactive.
    pub fn cancel(&mut self, agent: &mut A) {
        if !self.active {
            return;
        }
        for child in self.behavior.children_mut() {
            child.cancel(agent);
        }
        self.behavior.cancel(agent);
        self.active = false;
    }

    /// Clear the active flag across the whole subtree without firing any hooks, so the next tick
    /// starts a fresh activation everywhere.
    pub fn deactivate(&mut self) {
        self.active = false;
        for child in self.behavior.children_mut() {
            child.deactivate();
        }
    }

    /// Number the whole tree in pre-order starting at 0. Returns the node count.
    pub fn assign_ids(&mut self) -> u32 {
        let mut next = 0;
        self.number(&mut next);
        next
    }

    fn number(&mut self, next: &mut u32) {
        self.id = NodeId(*next);
        *next += 1;
        for child in self.behavior.children_mut() {
            child.number(next);
        }
    }

    /// Pre-order visit; the callback receives each node with its depth below `self`.
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&Node<A>, usize),
    {
        self.walk_at(0, f);
    }

    fn walk_at<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&Node<A>, usize),
    {
        f(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, f);
        }
    }

    pub fn find(&self, id: NodeId) -> Option<&Node<A>> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }
}

impl<A> Clone for Node<A>
where
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: self.label.clone(),
            active: self.active,
            behavior: self.behavior.clone_box(),
        }
    }
}

impl<A> fmt::Debug for Node<A>
where
    A: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("label", &self.label)
            .field("active", &self.active)
            .field("children", &self.children())
            .finish()
    }
}
