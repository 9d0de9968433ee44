//! Main indexing logic

use anyhow::{Context, Result};
use git2::Repository;
use gindex_core::IndexTransport;
use std::time::Instant;

use crate::indexer::Indexer;
use crate::stats::{format_duration, IndexStats};

impl<T: IndexTransport> Indexer<T> {
    /// Indexes `rev` and its history, newest first.
    ///
    /// `rev` is anything git can resolve to a commit (`HEAD`, a branch, a
    /// SHA). Commits are processed in parallel batches of `batch_size`.
    pub fn index_from(&self, rev: &str, max_commits: Option<usize>, batch_size: usize) -> Result<IndexStats> {
        let start_time = Instant::now();
        let repo = Repository::open(&self.repo_path)
            .context("Failed to open repository")?;

        let commit = repo
            .revparse_single(rev)
            .with_context(|| format!("Failed to resolve {:?}", rev))?
            .peel_to_commit()
            .with_context(|| format!("{:?} does not point to a commit", rev))?;

        let config = self.pipeline.config();
        log::info!(
            "Indexing {} into {:?} from {} ({})",
            config.repository_id,
            config.index,
            commit.id(),
            commit.summary().unwrap_or("")
        );

        let mut revwalk = repo.revwalk()?;
        revwalk.push(commit.id())?;
        revwalk.set_sorting(git2::Sort::TIME)?;

        let batch_size = batch_size.max(1);
        let mut stats = IndexStats::default();
        let mut batch = Vec::with_capacity(batch_size);
        let mut queued = 0;
        let mut batches_processed = 0;

        for oid_result in revwalk {
            if let Some(max) = max_commits {
                if queued >= max {
                    log::info!("Reached max commit limit: {}", max);
                    break;
                }
            }

            batch.push(oid_result.context("Failed to get commit OID")?);
            queued += 1;

            if batch.len() >= batch_size {
                stats.merge(&self.process_batch(&batch));
                batches_processed += 1;
                batch.clear();
                log_progress(batches_processed, &stats, start_time);
            }
        }

        if !batch.is_empty() {
            stats.merge(&self.process_batch(&batch));
        }

        stats.elapsed_time = start_time.elapsed();

        log::info!("Indexing completed in {}", format_duration(stats.elapsed_time));
        log::info!("   • Commits: {} indexed, {} skipped", stats.commits_indexed, stats.commits_skipped);
        log::info!(
            "   • Blobs:   {} indexed ({} with content), {} skipped",
            stats.blobs_indexed,
            stats.blobs_with_content,
            stats.blobs_skipped
        );
        if stats.errors > 0 {
            log::warn!("   • Errors:  {} (see warnings above for the affected objects)", stats.errors);
        } else {
            log::info!("   • Errors:  0");
        }

        Ok(stats)
    }
}

fn log_progress(batches: usize, stats: &IndexStats, start_time: Instant) {
    let elapsed = start_time.elapsed();
    let speed = if elapsed.as_secs_f64() > 0.0 {
        stats.commits_seen() as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };
    log::info!(
        "Batch #{} | Commits: {} | Blobs: {} | Errors: {} | Speed: {:.1} commits/s | Elapsed: {}",
        batches,
        stats.commits_seen(),
        stats.blobs_indexed + stats.blobs_skipped,
        stats.errors,
        speed,
        format_duration(elapsed)
    );
}
