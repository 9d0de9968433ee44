//! Id command implementation

use anyhow::Result;
use clap::Subcommand;
use gindex_core::{blob_document_id, commit_document_id};

#[derive(Subcommand)]
pub enum IdTarget {
    /// Id of a commit document
    Commit {
        /// Logical repository id
        repository_id: String,
        commit_sha: String,
    },

    /// Id of a blob document (one per commit and path)
    Blob {
        /// Logical repository id
        repository_id: String,
        commit_sha: String,
        path: String,
        blob_sha: String,
    },
}

/// Prints the document id for targeted re-indexing or lookups
pub fn cmd_id(target: IdTarget) -> Result<()> {
    let id = match target {
        IdTarget::Commit { repository_id, commit_sha } => {
            commit_document_id(&repository_id, &commit_sha)
        }
        IdTarget::Blob { repository_id, commit_sha, path, blob_sha } => {
            blob_document_id(&repository_id, &commit_sha, &path, &blob_sha)
        }
    };
    println!("{}", id);
    Ok(())
}
