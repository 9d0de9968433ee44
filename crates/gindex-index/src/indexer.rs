//! Main indexer structure

use anyhow::{Context, Result};
use git2::Repository;
use gindex_core::{GitCommit, GitSignature, IndexTransport};
use std::path::{Path, PathBuf};

use crate::pipeline::Pipeline;

/// Traversal options
#[derive(Debug, Clone, Default)]
pub struct IndexerOptions {
    /// Only index blobs added or modified relative to the first parent
    pub changed_only: bool,
}

/// Walks a git repository and feeds its objects through a [`Pipeline`]
pub struct Indexer<T> {
    /// Path to the Git repository
    pub(crate) repo_path: PathBuf,

    /// Shared by all worker threads
    pub(crate) pipeline: Pipeline<T>,

    pub(crate) options: IndexerOptions,
}

impl<T: IndexTransport> Indexer<T> {
    /// Creates a new indexer for the given repository
    pub fn new<P: AsRef<Path>>(repo_path: P, pipeline: Pipeline<T>, options: IndexerOptions) -> Result<Self> {
        // Verify repository exists
        let repo = Repository::open(repo_path.as_ref())
            .with_context(|| format!("Failed to open repository at {:?}", repo_path.as_ref()))?;
        drop(repo); // We'll open it per-thread

        Ok(Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            pipeline,
            options,
        })
    }

    pub fn pipeline(&self) -> &Pipeline<T> {
        &self.pipeline
    }
}

/// Copies the fields of a libgit2 commit into its native representation
pub fn git_commit(commit: &git2::Commit) -> GitCommit {
    GitCommit {
        sha: commit.id().to_string(),
        author: signature(&commit.author()),
        committer: signature(&commit.committer()),
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        parent_shas: commit.parent_ids().map(|id| id.to_string()).collect(),
        tree_sha: commit.tree_id().to_string(),
        timestamp: commit.time().seconds(),
    }
}

fn signature(sig: &git2::Signature) -> GitSignature {
    GitSignature::new(
        String::from_utf8_lossy(sig.name_bytes()),
        String::from_utf8_lossy(sig.email_bytes()),
        sig.when().seconds(),
    )
}
