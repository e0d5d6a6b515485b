#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

use crate::{NodeId, Status};

/// Receives the result of every node ticked during a driver tick.
///
/// Sinks are for introspection only; nothing they do may feed back into tree semantics.
pub trait StatusSink {
    fn record(&mut self, node: NodeId, status: Status);
}

#[derive(Debug, Default)]
pub struct NullStatusSink;

impl StatusSink for NullStatusSink {
    fn record(&mut self, _node: NodeId, _status: Status) {}
}

/// Per-tick `NodeId -> Status` map. The first status recorded for a node in a tick wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickStatusMap {
    statuses: BTreeMap<NodeId, Status>,
}

impl TickStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    pub fn get(&self, node: NodeId) -> Option<Status> {
        self.statuses.get(&node).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.statuses.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Entries in ascending id order (pre-order for trees numbered by `Node::assign_ids`).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Status)> + '_ {
        self.statuses.iter().map(|(id, status)| (*id, *status))
    }
}

impl StatusSink for TickStatusMap {
    fn record(&mut self, node: NodeId, status: Status) {
        if let btree_map::Entry::Vacant(slot) = self.statuses.entry(node) {
            slot.insert(status);
        }
    }
}
