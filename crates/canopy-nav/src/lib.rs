//! Navigation collaborators for movement leaves.
//!
//! The behavior tree never moves anything itself: a `MoveTo` leaf hands a destination to a
//! [`NavAgent`] and polls the remaining distance. [`PathFollower`] is a small reference agent for
//! tests and demos.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod follower;
pub mod math;
pub mod navigator;

pub use agent::NavAgent;
pub use follower::PathFollower;
pub use math::Vec2;
pub use navigator::{NavPath, Navigator, Region, StraightLine};
