//! Freeze engine
//!
//! Marks every container reachable from a root as immutable. Total: never
//! fails, including on cyclic graphs.
//!
//! Arrays and plain objects are frozen in place (the node keeps its index
//! and rejects all further mutation). Date and RegExp yield fresh, unfrozen
//! copies: their state is not held in properties, so marking them frozen
//! would not make them immutable, and a fresh copy keeps original and result
//! independent. Map and Set keep an insertable shape but have their contents
//! deep-frozen, including entries added later through `map_set`/`set_add`.

use log::trace;

use crate::engine::visited::VisitedMap;
use crate::values::{FreezeState, NodeId, Value, ValueGraph};

/// Deep-freeze the graph reachable from `root`, returning the root of the
/// frozen result (a new node only when the root itself is a Date or RegExp).
pub fn deep_freeze(graph: &mut ValueGraph, root: NodeId) -> NodeId {
    let mut visited = VisitedMap::new();
    let result = freeze_node(graph, root, &mut visited);
    trace!("deep_freeze: {} container nodes visited", visited.len());
    result
}

fn freeze_node(graph: &mut ValueGraph, id: NodeId, visited: &mut VisitedMap) -> NodeId {
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
            // idempotence fast path: an already-frozen subtree is not
            // re-traversed
            if graph.freeze_state(id) == FreezeState::Frozen {
                return id;
            }
            let items = items.clone();
            visited.insert(id, id);
            for (index, item) in items.into_iter().enumerate() {
                let frozen = freeze_node(graph, item, visited);
                if frozen != item {
                    graph.replace_array_item(id, index, frozen);
                }
            }
            graph.mark_frozen(id);
            id
        }

        Value::Object(props) => {
            if graph.freeze_state(id) == FreezeState::Frozen {
                return id;
            }
            let props: Vec<(String, NodeId)> =
                props.iter().map(|(k, v)| (k.clone(), *v)).collect();
            visited.insert(id, id);
            for (key, value) in props {
                let frozen = freeze_node(graph, value, visited);
                if frozen != value {
                    graph.insert_prop_raw(id, key, frozen);
                }
            }
            graph.mark_frozen(id);
            id
        }

        Value::Map(entries) => {
            // the container shape stays insertable; only its contents are
            // made immutable, and later insertions freeze on entry
            if graph.freeze_state(id) == FreezeState::FrozenContents {
                return id;
            }
            let entries = entries.clone();
            visited.insert(id, id);
            for (index, (key, value)) in entries.into_iter().enumerate() {
                let frozen_key = freeze_node(graph, key, visited);
                let frozen_value = freeze_node(graph, value, visited);
                if frozen_key != key || frozen_value != value {
                    graph.replace_entry(id, index, frozen_key, frozen_value);
                }
            }
            graph.mark_frozen_contents(id);
            id
        }

        Value::Set(members) => {
            if graph.freeze_state(id) == FreezeState::FrozenContents {
                return id;
            }
            let members = members.clone();
            visited.insert(id, id);
            for (index, member) in members.into_iter().enumerate() {
                let frozen = freeze_node(graph, member, visited);
                if frozen != member {
                    graph.replace_member(id, index, frozen);
                }
            }
            graph.mark_frozen_contents(id);
            id
        }
    }
}
