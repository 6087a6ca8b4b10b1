//! Equality engine
//!
//! Decides whether two independently-rooted value graphs are structurally
//! identical. Total and symmetric; cyclic comparisons terminate through the
//! pair map rather than looping.

use log::trace;

use crate::engine::visited::PairMap;
use crate::values::{NodeId, Value, ValueGraph};

/// Structural equality of the graphs rooted at `a` and `b`.
///
/// Fast paths, in order: same node, exactly one side nullish, differing
/// kind. Containers recurse; a pair already being compared is assumed equal
/// for that branch so cyclic traversal terminates, while a left node
/// re-encountered against a *different* partner is a mismatch.
pub fn structural_eq(graph: &ValueGraph, a: NodeId, b: NodeId) -> bool {
    let mut pairs = PairMap::new();
    let result = eq_node(graph, a, b, &mut pairs);
    trace!("structural_eq({:?}, {:?}) = {}", a, b, result);
    result
}

fn eq_node(graph: &ValueGraph, a: NodeId, b: NodeId, pairs: &mut PairMap) -> bool {
    // reference equality: identical node implies equal
    if a == b {
        return true;
    }

    let (va, vb) = (graph.value(a), graph.value(b));
    if va.is_nullish() || vb.is_nullish() {
        // null and undefined are each equal only to themselves, and the
        // same-node fast path has already run
        return va.same_primitive(vb);
    }

    if va.kind() != vb.kind() {
        return false;
    }

    if va.kind().is_container() {
        if let Some(partner) = pairs.partner(a) {
            return partner == b;
        }
        pairs.mark(a, b);
    }

    match (va, vb) {
        (Value::Date(da), Value::Date(db)) => da.same_instant(db),

        (Value::RegExp(ra), Value::RegExp(rb)) => ra.same_pattern(rb),

        (Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                return false;
            }
            xs.iter()
                .zip(ys.iter())
                .all(|(&x, &y)| eq_node(graph, x, y, pairs))
        }

        (Value::Object(pa), Value::Object(pb)) => {
            if pa.len() != pb.len() {
                return false;
            }
            for (key, &x) in pa.iter() {
                match pb.get(key) {
                    Some(&y) => {
                        if !eq_node(graph, x, y, pairs) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            // equal counts alone do not guarantee equal key sets
            pb.keys().all(|key| pa.contains_key(key))
        }

        (Value::Map(ea), Value::Map(eb)) => {
            if ea.len() != eb.len() {
                return false;
            }
            let mut used = vec![false; eb.len()];
            'outer: for &(left_key, left_value) in ea.iter() {
                for (j, &(right_key, right_value)) in eb.iter().enumerate() {
                    if used[j] {
                        continue;
                    }
                    if eq_node(graph, left_key, right_key, pairs)
                        && eq_node(graph, left_value, right_value, pairs)
                    {
                        used[j] = true;
                        continue 'outer;
                    }
                }
                return false;
            }
            true
        }

        (Value::Set(ma), Value::Set(mb)) => {
            if ma.len() != mb.len() {
                return false;
            }
            // order-independent matching, O(n²) accepted for typical sizes
            let mut used = vec![false; mb.len()];
            'outer: for &x in ma.iter() {
                for (j, &y) in mb.iter().enumerate() {
                    if used[j] {
                        continue;
                    }
                    if eq_node(graph, x, y, pairs) {
                        used[j] = true;
                        continue 'outer;
                    }
                }
                return false;
            }
            true
        }

        _ => va.same_primitive(vb),
    }
}
