//! Deterministic, engine-agnostic behavior tree kernel primitives.
//!
//! The kernel owns the node lifecycle (activation, completion hooks, cancellation) and the
//! per-tick status reporting seam. Concrete node kinds and the tree driver live in `canopy`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod node;
pub mod status;
pub mod tick;
pub mod trace;

pub use node::{Behavior, BehaviorClone, Node, NodeId};
pub use status::Status;
pub use tick::{FixedStep, TickContext, DEFAULT_TICK_INTERVAL};
pub use trace::{NullStatusSink, StatusSink, TickStatusMap};
