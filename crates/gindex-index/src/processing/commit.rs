//! Commit processing logic

use anyhow::{Context, Result};
use git2::{Commit, Delta, FileMode, ObjectType, Oid, Repository, Tree};
use gindex_core::IndexTransport;
use rayon::prelude::*;

use super::blob::process_blob;
use crate::indexer::{git_commit, Indexer};
use crate::stats::IndexStats;

impl<T: IndexTransport> Indexer<T> {
    /// Processes a batch of commits in parallel and returns their combined
    /// counters. A commit that fails is counted, never propagated.
    pub(super) fn process_batch(&self, oids: &[Oid]) -> IndexStats {
        let repo_path = &self.repo_path;

        // Each thread takes a chunk and opens the repository once for it
        let num_threads = rayon::current_num_threads();
        let chunk_size = oids.len().div_ceil(num_threads);

        oids.par_chunks(chunk_size.max(1))
            .map(|chunk| {
                let mut stats = IndexStats::default();
                let repo = match Repository::open(repo_path) {
                    Ok(r) => r,
                    Err(e) => {
                        log::warn!("Failed to open repository for {} commits: {}", chunk.len(), e);
                        stats.errors += chunk.len();
                        return stats;
                    }
                };

                for oid in chunk {
                    log::debug!("Processing commit: {}", oid);
                    if let Err(e) = self.process_commit(&repo, *oid, &mut stats) {
                        log::warn!("Failed to process commit {}: {:?}", oid, e);
                        stats.errors += 1;
                    }
                }
                stats
            })
            .reduce(IndexStats::default, |mut acc, s| {
                acc.merge(&s);
                acc
            })
    }

    /// Indexes the commit document and the selected blobs of one commit
    pub(super) fn process_commit(&self, repo: &Repository, oid: Oid, stats: &mut IndexStats) -> Result<()> {
        let commit = repo.find_commit(oid).context("Failed to find commit")?;
        let commit_sha = oid.to_string();

        match self.pipeline.index_commit(&git_commit(&commit)) {
            Ok(outcome) => stats.record_commit(outcome),
            Err(e) => {
                log::warn!("{}", e);
                stats.errors += 1;
            }
        }

        let blobs = if self.options.changed_only {
            changed_blobs(repo, &commit)?
        } else {
            all_blobs(repo, &commit, stats)?
        };

        for (ordinal, (path, blob_oid)) in blobs.iter().enumerate() {
            process_blob(&self.pipeline, repo, path, *blob_oid, &commit_sha, ordinal, stats);
        }

        Ok(())
    }
}

/// Git mode of symbolic links; their blob holds the link target
const SYMLINK_MODE: i32 = 0o120000;

/// Every file blob reachable from the commit's tree, in pre-order.
///
/// Subtrees that cannot be loaded are logged and counted; the remaining
/// entries of the commit are still returned.
fn all_blobs(repo: &Repository, commit: &Commit, stats: &mut IndexStats) -> Result<Vec<(String, Oid)>> {
    let tree = commit.tree().context("Failed to get commit tree")?;
    let mut blobs = Vec::new();
    collect_blobs(repo, &tree, "", &mut blobs, stats);
    Ok(blobs)
}

fn collect_blobs(
    repo: &Repository,
    tree: &Tree,
    prefix: &str,
    blobs: &mut Vec<(String, Oid)>,
    stats: &mut IndexStats,
) {
    for entry in tree.iter() {
        let path = format!("{}{}", prefix, String::from_utf8_lossy(entry.name_bytes()));
        match entry.kind() {
            Some(ObjectType::Blob) if entry.filemode() != SYMLINK_MODE => {
                blobs.push((path, entry.id()));
            }
            Some(ObjectType::Tree) => match repo.find_tree(entry.id()) {
                Ok(subtree) => collect_blobs(repo, &subtree, &format!("{}/", path), blobs, stats),
                Err(e) => {
                    log::warn!("Failed to load tree {} at {}: {}", entry.id(), path, e);
                    stats.errors += 1;
                }
            },
            // Submodules show up as commits; only blobs carry file content
            _ => {}
        }
    }
}

/// Blobs added or modified relative to the first parent
fn changed_blobs(repo: &Repository, commit: &Commit) -> Result<Vec<(String, Oid)>> {
    let tree = commit.tree().context("Failed to get commit tree")?;
    let parent_tree = match commit.parent_count() {
        0 => None,
        _ => Some(commit.parent(0)?.tree().context("Failed to get parent tree")?),
    };

    let diff = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
        .context("Failed to diff against parent")?;

    let blobs = diff
        .deltas()
        .filter(|delta| {
            matches!(
                delta.status(),
                Delta::Added | Delta::Modified | Delta::Renamed | Delta::Copied | Delta::Typechange
            )
        })
        .filter_map(|delta| {
            let file = delta.new_file();
            if matches!(
                file.mode(),
                FileMode::Commit | FileMode::Tree | FileMode::Link | FileMode::Unreadable
            ) {
                return None;
            }
            let path = file.path()?.to_string_lossy().into_owned();
            Some((path, file.id()))
        })
        .collect();

    Ok(blobs)
}
