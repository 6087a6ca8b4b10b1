//! Visited-set tracking
//!
//! Both trackers key on arena indices, which serve as reference identity in
//! this model. They are allocated fresh per top-level engine call and
//! discarded on return.

use std::collections::HashMap;

use crate::values::NodeId;

/// Maps an already-visited source node to its already-produced result node.
///
/// Used by clone and freeze: an entry is created for every container node
/// exactly once per traversal, before its children are descended into, so a
/// cyclic back-reference resolves to the (still being populated) result.
#[derive(Debug, Default)]
pub struct VisitedMap {
    entries: HashMap<NodeId, NodeId>,
}

impl VisitedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: NodeId) -> Option<NodeId> {
        self.entries.get(&source).copied()
    }

    pub fn insert(&mut self, source: NodeId, result: NodeId) {
        self.entries.insert(source, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tracks in-progress comparison pairs for the equality engine.
///
/// A left-hand node maps to the right-hand node it is currently being
/// compared against. Re-encountering the same pair is assumed equal so the
/// traversal terminates; re-encountering the left node against a different
/// partner is a structural mismatch.
#[derive(Debug, Default)]
pub struct PairMap {
    partners: HashMap<NodeId, NodeId>,
}

impl PairMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partner(&self, left: NodeId) -> Option<NodeId> {
        self.partners.get(&left).copied()
    }

    pub fn mark(&mut self, left: NodeId, right: NodeId) {
        self.partners.insert(left, right);
    }
}
