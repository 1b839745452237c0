//! Quill - workspace configuration inspector
//!
//! Usage:
//!   quill dirs                # List resolved configuration directories
//!   quill agents              # List agent-instruction directories
//!   quill rules <relative>    # Print the merged instruction document
//!   quill check <path>...     # Classify paths against protection patterns
//!   quill patterns            # Show the protected pattern set

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_core::config::{ConfigLoader, DirectoryDiscoverer, QuillPaths};
use quill_core::fs::search::WalkSearch;
use quill_core::protect::ProtectionMatcher;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Workspace configuration inspector", long_about = None)]
struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resolved configuration directories in override order
    Dirs {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List directories that may carry agent instruction files
    Agents,

    /// Print the merged global/project instruction document
    Rules {
        /// Path relative to each configuration directory (e.g. rules/rules.md)
        relative: PathBuf,
    },

    /// Classify paths against the write-protection pattern set
    Check {
        /// Candidate paths (relative to the root, or absolute)
        paths: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the fixed protected pattern set and agent instructions
    Patterns,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let paths = QuillPaths::new()?;

    match cli.command {
        Commands::Dirs { format } => {
            let discoverer = DirectoryDiscoverer::new(paths, WalkSearch);
            let dirs = discoverer.resolve_directories(&root);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dirs)?),
                OutputFormat::Table => {
                    for dir in dirs {
                        println!("{:?}\t{}", dir.scope, dir.path.display());
                    }
                }
            }
        }
        Commands::Agents => {
            let discoverer = DirectoryDiscoverer::new(paths, WalkSearch);
            for dir in discoverer.agents_dirs(&root) {
                println!("{}", dir.display());
            }
        }
        Commands::Rules { relative } => {
            let loader = ConfigLoader::new(paths);
            let merged = loader.load(&relative, &root)?;
            println!("{}", merged.merged);
        }
        Commands::Check {
            paths: candidates,
            format,
        } => {
            let matcher = ProtectionMatcher::new(&root);
            let records = matcher.annotate_paths(&candidates);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Table => {
                    for record in records {
                        let marker = if record.is_protected {
                            "protected"
                        } else {
                            "writable"
                        };
                        println!("{marker}\t{}", record.path);
                    }
                }
            }
        }
        Commands::Patterns => {
            let matcher = ProtectionMatcher::new(&root);
            println!("{}", matcher.instructions());
        }
    }

    Ok(())
}
