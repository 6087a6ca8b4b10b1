//! Inspect subcommand

use std::path::Path;

use log::debug;

use crate::analysis::summarize;
use crate::cli::utils::load_graph;
use crate::error::Result;
use crate::values::ValueGraph;

/// Run the inspect subcommand
pub fn inspect(input_path: &Path, format: &str) -> Result<()> {
    let mut graph = ValueGraph::new();
    let root = load_graph(&mut graph, input_path)?;
    debug!("loaded {} nodes from {}", graph.len(), input_path.display());

    let summary = summarize(&graph, root);

    match format {
        "text" => {
            println!("nodes:  {}", summary.node_count);
            println!("cycles: {}", summary.cycle_count);
            for (kind, count) in &summary.kinds {
                println!("  {:<10} {}", kind, count);
            }
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
