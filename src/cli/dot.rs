//! Dot subcommand

use std::path::{Path, PathBuf};

use crate::analysis::{generate_dot, project, DotOptions};
use crate::cli::utils::{load_graph, write_output};
use crate::error::Result;
use crate::values::ValueGraph;

/// Run the dot subcommand
pub fn dot(input_path: &Path, output_path: Option<&PathBuf>) -> Result<()> {
    let mut graph = ValueGraph::new();
    let root = load_graph(&mut graph, input_path)?;

    let projected = project(&graph, root);
    let rendered = generate_dot(&projected, &DotOptions::default());
    write_output(&rendered, output_path)
}
