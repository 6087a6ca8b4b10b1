use serde_json::json;
use valgraph::interop::{from_json, to_json};
use valgraph::{deep_clone, deep_freeze, structural_eq, ValueGraph};

#[test]
fn test_parse_then_render_plain_document() {
    let mut g = ValueGraph::new();
    let document = json!({
        "name": "order-7",
        "total": 12.5,
        "lines": [
            { "sku": "a", "qty": 2.0 },
            { "sku": "b", "qty": 1.0 }
        ],
        "archived": false,
        "parent": null
    });
    let root = from_json(&mut g, &document).unwrap();
    assert_eq!(to_json(&g, root), document);
}

#[test]
fn test_tagged_containers_survive_round_trip() {
    let mut g = ValueGraph::new();
    let document = json!({
        "created": { "$date": "2024-06-30T12:00:00.000Z" },
        "matcher": { "$regexp": { "source": "^ord-\\d+$", "flags": "i" } },
        "index": { "$map": [[{ "$date": "2024-06-30T12:00:00.000Z" }, "first"]] },
        "tags": { "$set": ["a", "b"] }
    });
    let first = from_json(&mut g, &document).unwrap();
    let rendered = to_json(&g, first);
    let second = from_json(&mut g, &rendered).unwrap();
    assert!(structural_eq(&g, first, second));
}

#[test]
fn test_rendering_is_stable_across_clone_and_freeze() {
    let mut g = ValueGraph::new();
    let document = json!({ "a": [1.0, 2.0], "b": { "$set": [3.0] } });
    let root = from_json(&mut g, &document).unwrap();

    let cloned = deep_clone(&mut g, root);
    assert_eq!(to_json(&g, cloned), to_json(&g, root));

    let frozen = deep_freeze(&mut g, root);
    assert_eq!(to_json(&g, frozen), document);
}

#[test]
fn test_cyclic_graph_renders_with_markers() {
    let mut g = ValueGraph::new();
    let name = g.text("root");
    let obj = g.object([("name", name)]);
    let list = g.array([obj]);
    g.object_set(obj, "children", list).unwrap();

    let rendered = to_json(&g, obj);
    assert_eq!(rendered["children"][0], json!("[Circular]"));
    assert_eq!(rendered["name"], json!("root"));
}

#[test]
fn test_symbols_and_functions_render_as_display_strings() {
    let mut g = ValueGraph::new();
    let sym = g.symbol(Some("marker"));
    let func = g.function_ref(Some("handler"));
    let obj = g.object([("s", sym), ("f", func)]);
    let rendered = to_json(&g, obj);
    assert_eq!(rendered["s"], json!("Symbol(marker)"));
    assert_eq!(rendered["f"], json!("[Function: handler]"));
}
