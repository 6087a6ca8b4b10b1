//! Value-graph visualization
//!
//! DOT generation for projected value graphs.

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

use crate::analysis::projection::{EdgeKind, ValueNode};

/// DOT generation options
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Include edge labels
    pub include_labels: bool,
    /// Include edge colors
    pub include_colors: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            include_labels: true,
            include_colors: true,
        }
    }
}

/// Generate DOT representation of a projected value graph
pub fn generate_dot(graph: &DiGraph<ValueNode, EdgeKind>, options: &DotOptions) -> String {
    let mut dot = String::new();
    dot.push_str("digraph ValueGraph {\n");
    dot.push_str("  rankdir=TB;\n");
    dot.push_str("  node [shape=box];\n\n");

    // Add nodes
    for node in graph.node_indices() {
        if let Some(weight) = graph.node_weight(node) {
            dot.push_str(&format!(
                "  {} [label=\"{}\"];\n",
                node.index(),
                escape_label(&weight.label)
            ));
        }
    }

    dot.push('\n');

    // Add edges with labels and colors
    for edge in graph.edge_references() {
        let mut edge_str = format!(
            "  {} -> {}",
            edge.source().index(),
            edge.target().index()
        );
        let mut attributes = Vec::new();

        if options.include_labels {
            attributes.push(format!("label=\"{}\"", escape_label(&edge_label(edge.weight()))));
        }

        if options.include_colors {
            if let Some(color) = edge_color(edge.weight()) {
                attributes.push(format!("color=\"{}\"", color));
            }
        }

        if !attributes.is_empty() {
            edge_str.push_str(&format!(" [{}]", attributes.join(", ")));
        }

        edge_str.push_str(";\n");
        dot.push_str(&edge_str);
    }

    dot.push_str("}\n");
    dot
}

/// Label for a containment edge
fn edge_label(edge: &EdgeKind) -> String {
    match edge {
        EdgeKind::Property(name) => format!(".{}", name),
        EdgeKind::Index(i) => format!("[{}]", i),
        EdgeKind::MapKey(i) => format!("key {}", i),
        EdgeKind::MapValue(i) => format!("val {}", i),
        EdgeKind::Member(i) => format!("member {}", i),
    }
}

/// Color for a containment edge
fn edge_color(edge: &EdgeKind) -> Option<&'static str> {
    match edge {
        EdgeKind::Property(_) => None,
        EdgeKind::Index(_) => Some("gray"),
        EdgeKind::MapKey(_) => Some("blue"),
        EdgeKind::MapValue(_) => Some("green"),
        EdgeKind::Member(_) => Some("purple"),
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
