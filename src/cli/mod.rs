//! Command-line interface module
//!
//! This module contains the implementations for the CLI subcommands.

pub mod compare;
pub mod dot;
pub mod inspect;

/// Common CLI utilities
pub mod utils {
    use std::path::{Path, PathBuf};

    use crate::error::{Error, Result};
    use crate::interop::from_json;
    use crate::values::{NodeId, ValueGraph};

    /// Read a tagged-JSON file and load it into the graph
    pub fn load_graph(graph: &mut ValueGraph, path: &Path) -> Result<NodeId> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
        let json: serde_json::Value = serde_json::from_str(&data)?;
        from_json(graph, &json)
    }

    /// Write output to file or stdout
    pub fn write_output(content: &str, output_path: Option<&PathBuf>) -> Result<()> {
        match output_path {
            Some(path) => std::fs::write(path, content).map_err(Error::from),
            None => {
                println!("{}", content);
                Ok(())
            }
        }
    }
}
