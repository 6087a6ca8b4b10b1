//! Display-JSON interop
//!
//! Renders value graphs as JSON with container tagging (`$date`, `$regexp`,
//! `$map`, `$set`) and `"[Circular]"` markers for back-references, and
//! parses the same tagged form back into a graph. The rendering is for
//! display: `undefined`, non-finite numbers, symbols and function references
//! collapse to display strings, and cycles are not re-created on parse.

use serde_json::{json, Map as JsonMap, Value as JsonValue};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::values::{DateValue, NodeId, Value, ValueGraph};

/// Render the graph reachable from `root` as tagged display JSON.
///
/// A node encountered again along the current path renders as
/// `"[Circular]"`; shared (diamond-shaped) references off the path render
/// normally each time.
pub fn to_json(graph: &ValueGraph, root: NodeId) -> JsonValue {
    let mut path = HashSet::new();
    render(graph, root, &mut path)
}

fn render(graph: &ValueGraph, id: NodeId, path: &mut HashSet<NodeId>) -> JsonValue {
    match graph.value(id) {
        Value::Undefined | Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => render_number(*n),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Symbol(sym) => {
            JsonValue::String(format!("Symbol({})", sym.description().unwrap_or("")))
        }
        Value::FunctionRef(func) => {
            JsonValue::String(format!("[Function: {}]", func.name().unwrap_or("anonymous")))
        }
        Value::Date(date) => {
            let text = date
                .to_iso_string()
                .unwrap_or_else(|| "Invalid Date".to_string());
            json!({ "$date": text })
        }
        Value::RegExp(regexp) => json!({
            "$regexp": { "source": regexp.source(), "flags": regexp.flags() }
        }),
        Value::Array(items) => {
            if !path.insert(id) {
                return JsonValue::String("[Circular]".to_string());
            }
            let rendered = items.iter().map(|&item| render(graph, item, path)).collect();
            path.remove(&id);
            JsonValue::Array(rendered)
        }
        Value::Map(entries) => {
            if !path.insert(id) {
                return JsonValue::String("[Circular]".to_string());
            }
            let rendered: Vec<JsonValue> = entries
                .iter()
                .map(|&(k, v)| json!([render(graph, k, path), render(graph, v, path)]))
                .collect();
            path.remove(&id);
            json!({ "$map": rendered })
        }
        Value::Set(members) => {
            if !path.insert(id) {
                return JsonValue::String("[Circular]".to_string());
            }
            let rendered: Vec<JsonValue> =
                members.iter().map(|&m| render(graph, m, path)).collect();
            path.remove(&id);
            json!({ "$set": rendered })
        }
        Value::Object(props) => {
            if !path.insert(id) {
                return JsonValue::String("[Circular]".to_string());
            }
            let mut rendered = JsonMap::new();
            for (key, &value) in props.iter() {
                rendered.insert(key.clone(), render(graph, value, path));
            }
            path.remove(&id);
            JsonValue::Object(rendered)
        }
    }
}

fn render_number(n: f64) -> JsonValue {
    if n.is_nan() {
        JsonValue::String("NaN".to_string())
    } else if n.is_infinite() {
        JsonValue::String(if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

/// Parse tagged display JSON into the graph, returning the new root.
pub fn from_json(graph: &mut ValueGraph, json: &JsonValue) -> Result<NodeId> {
    match json {
        JsonValue::Null => Ok(graph.null()),
        JsonValue::Bool(b) => Ok(graph.boolean(*b)),
        JsonValue::Number(n) => {
            let value = n.as_f64().ok_or_else(|| Error::Json {
                message: format!("unrepresentable number: {}", n),
            })?;
            Ok(graph.number(value))
        }
        JsonValue::String(s) => Ok(graph.text(s.clone())),
        JsonValue::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                children.push(from_json(graph, item)?);
            }
            Ok(graph.array(children))
        }
        JsonValue::Object(props) => {
            if props.len() == 1 {
                if let Some(tagged) = props.get("$date") {
                    return parse_date(graph, tagged);
                }
                if let Some(tagged) = props.get("$regexp") {
                    return parse_regexp(graph, tagged);
                }
                if let Some(tagged) = props.get("$map") {
                    return parse_map(graph, tagged);
                }
                if let Some(tagged) = props.get("$set") {
                    return parse_set(graph, tagged);
                }
            }
            let mut children = Vec::with_capacity(props.len());
            for (key, value) in props {
                children.push((key.clone(), from_json(graph, value)?));
            }
            Ok(graph.object(children))
        }
    }
}

fn parse_date(graph: &mut ValueGraph, tagged: &JsonValue) -> Result<NodeId> {
    let text = tagged.as_str().ok_or_else(|| Error::Json {
        message: "$date expects a string".to_string(),
    })?;
    if text == "Invalid Date" {
        return Ok(graph.date(DateValue::invalid()));
    }
    let date = DateValue::parse_iso(text).ok_or_else(|| Error::Json {
        message: format!("$date is not an ISO-8601 timestamp: {:?}", text),
    })?;
    Ok(graph.date(date))
}

fn parse_regexp(graph: &mut ValueGraph, tagged: &JsonValue) -> Result<NodeId> {
    let source = tagged
        .get("source")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::Json {
            message: "$regexp expects a source string".to_string(),
        })?;
    let flags = tagged
        .get("flags")
        .and_then(JsonValue::as_str)
        .unwrap_or("");
    graph.regexp(source, flags)
}

fn parse_map(graph: &mut ValueGraph, tagged: &JsonValue) -> Result<NodeId> {
    let pairs = tagged.as_array().ok_or_else(|| Error::Json {
        message: "$map expects an array of [key, value] pairs".to_string(),
    })?;
    let mut entries = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let pair = pair.as_array().filter(|p| p.len() == 2).ok_or_else(|| {
            Error::Json {
                message: "$map entries must be [key, value] pairs".to_string(),
            }
        })?;
        let key = from_json(graph, &pair[0])?;
        let value = from_json(graph, &pair[1])?;
        entries.push((key, value));
    }
    Ok(graph.map(entries))
}

fn parse_set(graph: &mut ValueGraph, tagged: &JsonValue) -> Result<NodeId> {
    let items = tagged.as_array().ok_or_else(|| Error::Json {
        message: "$set expects an array".to_string(),
    })?;
    let mut members = Vec::with_capacity(items.len());
    for item in items {
        members.push(from_json(graph, item)?);
    }
    Ok(graph.set(members))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::structural_eq;

    #[test]
    fn test_plain_value_round_trip() {
        let mut g = ValueGraph::new();
        let json = json!({ "a": 1.0, "b": [true, null, "s"] });
        let root = from_json(&mut g, &json).unwrap();
        assert_eq!(to_json(&g, root), json);
    }

    #[test]
    fn test_tagged_round_trip_is_structurally_equal() {
        let mut g = ValueGraph::new();
        let json = json!({
            "when": { "$date": "2024-01-01T00:00:00.000Z" },
            "pattern": { "$regexp": { "source": "a+", "flags": "i" } },
            "pairs": { "$map": [["k", 1]] },
            "items": { "$set": [1, 2, 3] }
        });
        let first = from_json(&mut g, &json).unwrap();
        let rendered = to_json(&g, first);
        let second = from_json(&mut g, &rendered).unwrap();
        assert!(structural_eq(&g, first, second));
    }

    #[test]
    fn test_circular_reference_renders_marker() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let obj = g.object([("v", one)]);
        g.object_set(obj, "me", obj).unwrap();
        let json = to_json(&g, obj);
        assert_eq!(json["me"], json!("[Circular]"));
        assert_eq!(json["v"], json!(1.0));
    }

    #[test]
    fn test_shared_reference_is_not_circular() {
        let mut g = ValueGraph::new();
        let one = g.number(1.0);
        let shared = g.array([one]);
        let obj = g.object([("a", shared), ("b", shared)]);
        let json = to_json(&g, obj);
        assert_eq!(json["a"], json!([1.0]));
        assert_eq!(json["b"], json!([1.0]));
    }

    #[test]
    fn test_invalid_date_round_trip() {
        let mut g = ValueGraph::new();
        let d = g.date(DateValue::invalid());
        let json = to_json(&g, d);
        assert_eq!(json, json!({ "$date": "Invalid Date" }));
        let back = from_json(&mut g, &json).unwrap();
        assert!(structural_eq(&g, d, back));
    }

    #[test]
    fn test_non_finite_numbers_render_as_strings() {
        let mut g = ValueGraph::new();
        let nan = g.number(f64::NAN);
        let inf = g.number(f64::INFINITY);
        assert_eq!(to_json(&g, nan), json!("NaN"));
        assert_eq!(to_json(&g, inf), json!("Infinity"));
    }

    #[test]
    fn test_malformed_tag_is_an_error() {
        let mut g = ValueGraph::new();
        let err = from_json(&mut g, &json!({ "$date": 5 })).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        let err = from_json(&mut g, &json!({ "$map": [[1]] })).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn test_invalid_regexp_tag_propagates_validation() {
        let mut g = ValueGraph::new();
        let json = json!({ "$regexp": { "source": "(", "flags": "" } });
        assert!(from_json(&mut g, &json).is_err());
    }
}
