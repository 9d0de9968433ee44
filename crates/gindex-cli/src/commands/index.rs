//! Index command implementation

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use gindex_db::IndexDb;
use gindex_index::{Indexer, IndexerOptions, Pipeline, PipelineConfig, DEFAULT_SNIFF_LEN};
use std::path::PathBuf;

#[derive(Args)]
pub struct IndexArgs {
    /// Path to local git repository
    #[arg(short, long)]
    pub repo: PathBuf,

    /// Logical repository id (e.g. "owner/name"), part of every document id
    #[arg(long)]
    pub repository_id: String,

    /// Storage-level numeric repository id stored in documents
    #[arg(long, default_value = "0")]
    pub source_repository_id: i64,

    /// Target index name
    #[arg(short, long, default_value = "gin")]
    pub index: String,

    /// Commit, branch or tag to start indexing from
    #[arg(short, long, default_value = "HEAD")]
    pub from: String,

    /// Maximum number of commits to process
    #[arg(short, long)]
    pub max_commits: Option<usize>,

    /// Number of threads for parallel processing (default: number of CPU cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Commits per parallel batch
    #[arg(short = 'b', long, default_value = "100")]
    pub batch_size: usize,

    /// Only index blobs added or modified by each commit
    #[arg(long)]
    pub changed_only: bool,

    /// Look documents up first and leave existing ones untouched
    #[arg(long)]
    pub skip_existing: bool,

    /// Bytes inspected to classify files with unknown extensions
    #[arg(long, default_value_t = DEFAULT_SNIFF_LEN)]
    pub sniff_len: usize,
}

/// Indexes a git repository into the local index
pub fn cmd_index(args: IndexArgs, db: IndexDb) -> Result<()> {
    // Configure Rayon thread pool if specified
    let num_threads = if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .context("Failed to configure thread pool")?;
        num_threads
    } else {
        rayon::current_num_threads()
    };

    log::info!("Starting indexing of repository at {:?}", args.repo);
    log::info!("Using {} threads, batch size {}", num_threads, args.batch_size);
    if args.changed_only {
        log::info!("Indexing changed blobs only");
    }

    let config = PipelineConfig {
        index: args.index,
        repository_id: args.repository_id,
        source_repository_id: args.source_repository_id,
        sniff_len: args.sniff_len,
        skip_existing: args.skip_existing,
    };
    let options = IndexerOptions {
        changed_only: args.changed_only,
    };

    let pipeline = Pipeline::new(config, db).context("Failed to create pipeline")?;
    let indexer = Indexer::new(&args.repo, pipeline, options)
        .context("Failed to create indexer")?;

    let stats = indexer
        .index_from(&args.from, args.max_commits, args.batch_size)
        .context("Failed to index repository")?;

    indexer.pipeline().transport().flush()?;

    let summary = stats.to_string();
    if stats.errors > 0 {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }
    Ok(())
}
