//! Cycle reporting
//!
//! Strongly-connected-component analysis over the projected graph. Used by
//! the CLI inspect summary; the engines themselves never need it, their
//! visited-sets handle cycles on the fly.

use petgraph::algo::tarjan_scc;
use serde::Serialize;

use crate::analysis::projection::project;
use crate::values::{NodeId, ValueGraph};

/// Cycles reachable from a root
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// Each cycle as the arena indices participating in it
    pub cycles: Vec<Vec<NodeId>>,
}

impl CycleReport {
    pub fn is_cyclic(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Report the cycles reachable from `root`.
///
/// A strongly connected component is a cycle when it has more than one node,
/// or when its single node carries a self-edge.
pub fn cycle_report(graph: &ValueGraph, root: NodeId) -> CycleReport {
    let projected = project(graph, root);
    let mut cycles = Vec::new();

    for component in tarjan_scc(&projected) {
        let is_cycle = component.len() > 1
            || component
                .first()
                .map(|&n| projected.find_edge(n, n).is_some())
                .unwrap_or(false);
        if is_cycle {
            cycles.push(
                component
                    .iter()
                    .map(|&n| projected[n].id)
                    .collect::<Vec<_>>(),
            );
        }
    }

    CycleReport { cycles }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acyclic_graph_reports_no_cycles() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let obj = g.object([("a", one)]);
        let report = cycle_report(&g, obj);
        assert!(!report.is_cyclic());
    }

    #[test]
    fn test_self_reference_reported() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let obj = g.object([("v", one)]);
        g.object_set(obj, "me", obj).unwrap();
        let report = cycle_report(&g, obj);
        assert_eq!(report.cycles.len(), 1);
        assert_eq!(report.cycles[0], vec![obj]);
    }

    #[test]
    fn test_two_node_cycle_reported() {
        let mut g = ValueGraph::new();
        let a = g.object(Vec::<(String, NodeId)>::new());
        let b = g.object(Vec::<(String, NodeId)>::new());
        g.object_set(a, "next", b).unwrap();
        g.object_set(b, "next", a).unwrap();
        let report = cycle_report(&g, a);
        assert_eq!(report.cycles.len(), 1);
        assert_eq!(report.cycles[0].len(), 2);
    }
}
