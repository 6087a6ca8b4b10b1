//! Value-graph analysis
//!
//! Projection into petgraph, DOT export, cycle reporting, and the summary
//! used by the CLI inspect subcommand.

pub mod cycles;
pub mod projection;
pub mod visualization;

use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::values::{NodeId, Value, ValueGraph};

pub use cycles::{cycle_report, CycleReport};
pub use projection::{project, EdgeKind, ValueNode};
pub use visualization::{generate_dot, DotOptions};

/// Summary of the graph reachable from a root
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    /// Distinct nodes reachable from the root
    pub node_count: usize,
    /// Reachable node count per kind
    pub kinds: BTreeMap<String, usize>,
    /// Number of distinct cycles
    pub cycle_count: usize,
}

/// Summarize the graph reachable from `root`
pub fn summarize(graph: &ValueGraph, root: NodeId) -> GraphSummary {
    let mut seen = HashSet::new();
    let mut kinds: BTreeMap<String, usize> = BTreeMap::new();
    collect(graph, root, &mut seen, &mut kinds);

    GraphSummary {
        node_count: seen.len(),
        kinds,
        cycle_count: cycle_report(graph, root).cycles.len(),
    }
}

fn collect(
    graph: &ValueGraph,
    id: NodeId,
    seen: &mut HashSet<NodeId>,
    kinds: &mut BTreeMap<String, usize>,
) {
    if !seen.insert(id) {
        return;
    }
    *kinds.entry(graph.kind(id).to_string()).or_insert(0) += 1;

    match graph.value(id) {
        Value::Array(items) => {
            for &item in items.iter() {
                collect(graph, item, seen, kinds);
            }
        }
        Value::Map(entries) => {
            for &(key, value) in entries.iter() {
                collect(graph, key, seen, kinds);
                collect(graph, value, seen, kinds);
            }
        }
        Value::Set(members) => {
            for &member in members.iter() {
                collect(graph, member, seen, kinds);
            }
        }
        Value::Object(props) => {
            for &value in props.values() {
                collect(graph, value, seen, kinds);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_each_node_once() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let shared = g.array([one]);
        let obj = g.object([("a", shared), ("b", shared)]);
        let summary = summarize(&g, obj);
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.kinds.get("primitive"), Some(&1));
        assert_eq!(summary.kinds.get("array"), Some(&1));
        assert_eq!(summary.cycle_count, 0);
    }

    #[test]
    fn test_summary_reports_cycles() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let obj = g.object([("v", one)]);
        g.object_set(obj, "me", obj).unwrap();
        let summary = summarize(&g, obj);
        assert_eq!(summary.cycle_count, 1);
    }
}
