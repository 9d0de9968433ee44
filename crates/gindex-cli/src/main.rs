//! gindex CLI - Publishes git repository content to a document index
//!
//! Provides:
//! - Indexing of a repository's commits and blobs
//! - Index statistics
//! - Inspection of stored documents and document ids

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gindex_db::IndexDb;
use std::path::PathBuf;

use commands::{cmd_id, cmd_index, cmd_show, cmd_stats, IdTarget, IndexArgs};

#[derive(Parser)]
#[command(name = "gindex")]
#[command(about = "Index git commits and file contents as searchable documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the index database
    #[arg(short, long, default_value = "./gindex.db")]
    database: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Indexes a git repository
    Index(IndexArgs),

    /// Shows document counts per index
    Stats,

    /// Prints a stored document
    Show {
        /// Index name
        index: String,

        /// Document type ("commit" or "blob")
        doc_type: String,

        /// Document id (40 hex chars)
        id: String,
    },

    /// Computes a document id without touching the index
    Id {
        #[command(subcommand)]
        target: IdTarget,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logger
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&cli.log_level)
    ).init();

    // Open database lazily; `id` works without one
    let open_db = || {
        IndexDb::open(&cli.database)
            .with_context(|| format!("Failed to open database at {:?}", cli.database))
    };

    match cli.command {
        Commands::Index(args) => {
            cmd_index(args, open_db()?)?;
        }
        Commands::Stats => {
            cmd_stats(open_db()?)?;
        }
        Commands::Show { index, doc_type, id } => {
            cmd_show(index, doc_type, id, open_db()?)?;
        }
        Commands::Id { target } => {
            cmd_id(target)?;
        }
    }

    Ok(())
}
