//! Blob processing logic

use git2::{Oid, Repository};
use gindex_core::{BlobDocument, GitBlob, IndexTransport};

use crate::pipeline::Pipeline;
use crate::stats::IndexStats;

/// Indexes the blob `oid` found at `path` in `commit_sha`.
///
/// Failures are logged and counted; they never stop the commit.
pub(super) fn process_blob<T: IndexTransport>(
    pipeline: &Pipeline<T>,
    repo: &Repository,
    path: &str,
    oid: Oid,
    commit_sha: &str,
    ordinal: usize,
    stats: &mut IndexStats,
) {
    let blob = match repo.find_blob(oid) {
        Ok(blob) => blob,
        Err(e) => {
            log::warn!("Failed to load blob {} at {} in {}: {}", oid, path, commit_sha, e);
            stats.errors += 1;
            return;
        }
    };

    let doc = BlobDocument::from_git(
        GitBlob::new(oid.to_string(), blob.size() as u64),
        pipeline.config().repository_id.as_str(),
    )
    .at(commit_sha, path)
    .with_oid(ordinal as i64);

    match pipeline.index_blob_document(doc, &blob) {
        Ok(outcome) => stats.record_blob(outcome),
        Err(e) => {
            log::warn!("{}", e);
            stats.errors += 1;
        }
    }
}
