use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use valgraph::cli;

#[derive(Parser)]
#[command(name = "valgraph")]
#[command(about = "Structural value-graph engine: clone, freeze, and compare cyclic value graphs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a tagged-JSON value graph: node counts, kinds, cycles
    Inspect {
        /// Input JSON file
        input: PathBuf,

        /// Output format (json, text)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Compare two tagged-JSON value graphs for structural equality
    Compare {
        /// Left input JSON file
        left: PathBuf,

        /// Right input JSON file
        right: PathBuf,
    },

    /// Export a value graph to DOT format for visualization
    Dot {
        /// Input JSON file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { input, format } => {
            cli::inspect::inspect(&input, &format).map_err(|e| miette!("{}", e))
        }
        Commands::Compare { left, right } => {
            let equal = cli::compare::compare(&left, &right).map_err(|e| miette!("{}", e))?;
            if !equal {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Dot { input, output } => {
            cli::dot::dot(&input, output.as_ref()).map_err(|e| miette!("{}", e))
        }
    }
}
