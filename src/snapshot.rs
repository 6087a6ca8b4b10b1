//! Immutable snapshots
//!
//! The contract the value-object layer consumes: raw input is cloned, the
//! clone is deep-frozen, and the frozen root is the snapshot's sole state.
//! Later equality between two snapshots is structural, never by reference.

use crate::engine::{deep_clone, deep_freeze, structural_eq};
use crate::values::{NodeId, ValueGraph};

/// An owned, immutable capture of a value graph.
///
/// Capturing clones the raw input (so later mutation of the input cannot
/// reach the snapshot) and deep-freezes the clone exactly once. The snapshot
/// addresses nodes in the graph it was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    root: NodeId,
}

impl Snapshot {
    /// Capture the graph reachable from `raw`
    pub fn capture(graph: &mut ValueGraph, raw: NodeId) -> Self {
        let owned = deep_clone(graph, raw);
        let frozen = deep_freeze(graph, owned);
        Self { root: frozen }
    }

    /// Root of the frozen capture
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Structural equality against another snapshot from the same graph
    pub fn matches(&self, graph: &ValueGraph, other: &Snapshot) -> bool {
        structural_eq(graph, self.root, other.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_is_isolated_from_later_mutation() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let raw = g.object([("v", one)]);
        let snapshot = Snapshot::capture(&mut g, raw);

        let two = g.number(2.0);
        g.object_set(raw, "v", two).unwrap();

        let expected_one = g.number(1.0);
        let got = g.object_get(snapshot.root(), "v").unwrap();
        assert!(structural_eq(&g, got, expected_one));
    }

    #[test]
    fn test_capture_root_is_frozen() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let raw = g.object([("v", one)]);
        let snapshot = Snapshot::capture(&mut g, raw);
        assert!(g.is_frozen(snapshot.root()));
        // the raw input stays mutable
        assert!(!g.is_frozen(raw));
    }

    #[test]
    fn test_equal_inputs_produce_matching_snapshots() {
        let mut g = ValueGraph::new();
        let a1 = g.number(1.0);
        let raw_a = g.object([("v", a1)]);
        let b1 = g.number(1.0);
        let raw_b = g.object([("v", b1)]);

        let snap_a = Snapshot::capture(&mut g, raw_a);
        let snap_b = Snapshot::capture(&mut g, raw_b);
        assert!(snap_a.matches(&g, &snap_b));
        assert!(snap_b.matches(&g, &snap_a));
    }

    #[test]
    fn test_cyclic_input_captures_without_looping() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let raw = g.object([("v", one)]);
        g.object_set(raw, "me", raw).unwrap();
        let snapshot = Snapshot::capture(&mut g, raw);
        assert_eq!(
            g.object_get(snapshot.root(), "me"),
            Some(snapshot.root())
        );
    }
}
