//! Clone engine
//!
//! Produces a fully independent copy of a value graph. Total: never fails
//! for any well-formed input, including cyclic graphs.

use log::trace;

use crate::engine::visited::VisitedMap;
use crate::values::{NodeId, Value, ValueGraph};

/// Deep-clone the graph reachable from `root`, returning the root of the
/// copy.
///
/// Primitives are returned unchanged (shared by the arena index — they are
/// atomic, so sharing is safe). Date and RegExp yield fresh nodes with the
/// same state. Containers are allocated empty and registered in the visited
/// map *before* their children are cloned; a child that cyclically
/// references an ancestor resolves to the already-allocated destination.
pub fn deep_clone(graph: &mut ValueGraph, root: NodeId) -> NodeId {
    let mut visited = VisitedMap::new();
    let result = clone_node(graph, root, &mut visited);
    trace!(
        "deep_clone: {} container nodes visited",
        visited.len()
    );
    result
}

fn clone_node(graph: &mut ValueGraph, id: NodeId, visited: &mut VisitedMap) -> NodeId {
    if let Some(done) = visited.get(id) {
        return done;
    }

    match graph.value(id) {
        Value::Undefined
        | Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Text(_)
        | Value::Symbol(_)
        | Value::FunctionRef(_) => id,

        Value::Date(date) => {
            let date = *date;
            graph.alloc(Value::Date(date))
        }

        Value::RegExp(regexp) => {
            let regexp = regexp.copied();
            graph.alloc(Value::RegExp(regexp))
        }

        Value::Array(items) => {
            let items = items.clone();
            let dest = graph.alloc(Value::Array(Vec::with_capacity(items.len())));
            visited.insert(id, dest);
            for item in items {
                let copy = clone_node(graph, item, visited);
                graph.push_raw(dest, copy);
            }
            dest
        }

        Value::Map(entries) => {
            let entries = entries.clone();
            let dest = graph.alloc(Value::Map(Vec::with_capacity(entries.len())));
            visited.insert(id, dest);
            for (key, value) in entries {
                // keys are values too: an object key is cloned, not reused
                let key_copy = clone_node(graph, key, visited);
                let value_copy = clone_node(graph, value, visited);
                graph.push_entry_raw(dest, key_copy, value_copy);
            }
            dest
        }

        Value::Set(members) => {
            let members = members.clone();
            let dest = graph.alloc(Value::Set(Vec::with_capacity(members.len())));
            visited.insert(id, dest);
            for member in members {
                let copy = clone_node(graph, member, visited);
                graph.push_member_raw(dest, copy);
            }
            dest
        }

        Value::Object(props) => {
            let props: Vec<(String, NodeId)> =
                props.iter().map(|(k, v)| (k.clone(), *v)).collect();
            let dest = graph.alloc(Value::Object(Default::default()));
            visited.insert(id, dest);
            for (key, value) in props {
                let copy = clone_node(graph, value, visited);
                graph.insert_prop_raw(dest, key, copy);
            }
            dest
        }
    }
}
