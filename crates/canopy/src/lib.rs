//! Ticked, resumable behavior trees built on `canopy-core`.
//!
//! A [`Controller`] owns one tree and ticks it on a fixed interval until the root returns a
//! terminal status. Trees are composed from [`Sequence`] / [`Selector`] composites,
//! [`Inverter`] / [`Repeater`] decorators and leaves ([`Wait`], [`FireEvent`], [`MoveTo`],
//! [`Call`], ...). A [`Preset`] is a shared tree template that is deep-cloned for every agent
//! that runs it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod builder;
pub mod composite;
pub mod controller;
pub mod decorator;
#[cfg(feature = "serde")]
pub mod def;
pub mod error;
pub mod leaf;
pub mod preset;

pub use canopy_core::{
    Behavior, FixedStep, Node, NodeId, NullStatusSink, Status, StatusSink, TickContext,
    TickStatusMap, DEFAULT_TICK_INTERVAL,
};
pub use canopy_nav::{NavAgent, Vec2};

pub use composite::{Selector, Sequence};
pub use controller::{Controller, ControllerConfig, ControllerState, RunOutcome};
pub use decorator::{Inverter, Repeater, RetryPolicy};
#[cfg(feature = "serde")]
pub use def::{Bindings, NodeKindDef, TreeDef};
pub use error::BtError;
pub use leaf::{Call, Condition, EventTarget, Fail, FireEvent, MoveTo, Succeed, Wait, ARRIVAL_EPSILON};
pub use preset::{Preset, TreeSource};
