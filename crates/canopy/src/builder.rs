//! Shorthands for building trees.
//!
//! `sequence(vec![wait(d), fire_event("done")])` instead of
//! `Node::new(Sequence::new(vec![Node::new(Wait::new(d)), Node::new(FireEvent::new("done"))]))`.
//! The closure-taking helpers also pin down the closure signature, so argument types can be
//! left to inference.

use std::borrow::Cow;
use std::time::Duration;

use canopy_core::{Node, Status, TickContext};
use canopy_nav::{NavAgent, Vec2};

use crate::{
    Call, Condition, EventTarget, Fail, FireEvent, Inverter, MoveTo, Repeater, RetryPolicy,
    Selector, Sequence, Succeed, Wait,
};

pub fn sequence<A: 'static>(children: Vec<Node<A>>) -> Node<A> {
    Node::new(Sequence::new(children))
}

/// Sequence that re-checks every child from the first on each tick.
pub fn sequence_all<A: 'static>(children: Vec<Node<A>>) -> Node<A> {
    Node::new(Sequence::new(children).always_check_all_nodes(true))
}

pub fn selector<A: 'static>(children: Vec<Node<A>>) -> Node<A> {
    Node::new(Selector::new(children))
}

pub fn inverter<A: 'static>(child: Node<A>) -> Node<A> {
    Node::new(Inverter::new(child))
}

pub fn repeater<A: 'static>(child: Node<A>, policy: RetryPolicy) -> Node<A> {
    Node::new(Repeater::with_policy(child, policy))
}

pub fn wait<A: 'static>(duration: Duration) -> Node<A> {
    Node::new(Wait::new(duration))
}

pub fn fire_event<A>(event: impl Into<Cow<'static, str>>) -> Node<A>
where
    A: EventTarget + 'static,
{
    Node::new(FireEvent::new(event))
}

pub fn move_to<A>(target: impl Into<Vec2>) -> Node<A>
where
    A: NavAgent + 'static,
{
    Node::new(MoveTo::new(Some(target.into())))
}

pub fn succeed<A: 'static>() -> Node<A> {
    Node::new(Succeed)
}

pub fn fail<A: 'static>() -> Node<A> {
    Node::new(Fail)
}

pub fn call<A, F>(method: F) -> Node<A>
where
    A: 'static,
    F: Fn(&TickContext, &mut A) -> Status + Clone + 'static,
{
    Node::new(Call::new(method))
}

pub fn condition<A, F>(cond: F) -> Node<A>
where
    A: 'static,
    F: Fn(&TickContext, &A) -> bool + Clone + 'static,
{
    Node::new(Condition::new(cond))
}
