//! Compare subcommand

use std::path::Path;

use crate::cli::utils::load_graph;
use crate::engine::structural_eq;
use crate::error::Result;
use crate::values::ValueGraph;

/// Run the compare subcommand. Returns whether the two inputs are
/// structurally equal.
pub fn compare(left_path: &Path, right_path: &Path) -> Result<bool> {
    let mut graph = ValueGraph::new();
    let left = load_graph(&mut graph, left_path)?;
    let right = load_graph(&mut graph, right_path)?;

    let equal = structural_eq(&graph, left, right);
    if equal {
        println!("equal");
    } else {
        println!("not equal");
    }
    Ok(equal)
}
