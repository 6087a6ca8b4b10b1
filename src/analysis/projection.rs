//! Petgraph projection
//!
//! Projects the subgraph reachable from a root into a petgraph `DiGraph`
//! with labeled containment edges, for visualization and cycle analysis.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::values::{NodeId, Value, ValueGraph};

/// Containment edge in the projected graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    /// Own property of a plain object
    Property(String),
    /// Array element
    Index(usize),
    /// Key of the n-th map entry
    MapKey(usize),
    /// Value of the n-th map entry
    MapValue(usize),
    /// Set member
    Member(usize),
}

/// Node weight in the projected graph
#[derive(Debug, Clone)]
pub struct ValueNode {
    /// Arena index of the projected node
    pub id: NodeId,
    /// Short display label
    pub label: String,
}

/// Project the reachable subgraph rooted at `root`
pub fn project(graph: &ValueGraph, root: NodeId) -> DiGraph<ValueNode, EdgeKind> {
    let mut projected = DiGraph::new();
    let mut indices: HashMap<NodeId, NodeIndex> = HashMap::new();
    intern(graph, &mut projected, &mut indices, root);
    projected
}

fn intern(
    graph: &ValueGraph,
    projected: &mut DiGraph<ValueNode, EdgeKind>,
    indices: &mut HashMap<NodeId, NodeIndex>,
    id: NodeId,
) -> NodeIndex {
    if let Some(&index) = indices.get(&id) {
        return index;
    }
    let index = projected.add_node(ValueNode {
        id,
        label: node_label(graph, id),
    });
    // interned before children so back-references resolve
    indices.insert(id, index);

    match graph.value(id) {
        Value::Array(items) => {
            for (i, &item) in items.iter().enumerate() {
                let child = intern(graph, projected, indices, item);
                projected.add_edge(index, child, EdgeKind::Index(i));
            }
        }
        Value::Map(entries) => {
            for (i, &(key, value)) in entries.iter().enumerate() {
                let key_index = intern(graph, projected, indices, key);
                projected.add_edge(index, key_index, EdgeKind::MapKey(i));
                let value_index = intern(graph, projected, indices, value);
                projected.add_edge(index, value_index, EdgeKind::MapValue(i));
            }
        }
        Value::Set(members) => {
            for (i, &member) in members.iter().enumerate() {
                let child = intern(graph, projected, indices, member);
                projected.add_edge(index, child, EdgeKind::Member(i));
            }
        }
        Value::Object(props) => {
            for (key, &value) in props.iter() {
                let child = intern(graph, projected, indices, value);
                projected.add_edge(index, child, EdgeKind::Property(key.clone()));
            }
        }
        _ => {}
    }

    index
}

/// Short display label for a node
pub fn node_label(graph: &ValueGraph, id: NodeId) -> String {
    match graph.value(id) {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Text(s) => format!("{:?}", s),
        Value::Symbol(sym) => format!("Symbol({})", sym.description().unwrap_or("")),
        Value::FunctionRef(func) => {
            format!("[Function: {}]", func.name().unwrap_or("anonymous"))
        }
        Value::Date(date) => date
            .to_iso_string()
            .unwrap_or_else(|| "Invalid Date".to_string()),
        Value::RegExp(regexp) => regexp.to_string(),
        Value::Array(items) => format!("array[{}]", items.len()),
        Value::Map(entries) => format!("map[{}]", entries.len()),
        Value::Set(members) => format!("set[{}]", members.len()),
        Value::Object(props) => format!("object[{}]", props.len()),
    }
}
