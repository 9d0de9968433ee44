//! Native repository objects as handed over by the git object source

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author or committer identity of a commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GitSignature {
    pub name: String,
    pub email: String,
    /// Signature time (Unix epoch seconds)
    pub when: i64,
}

impl GitSignature {
    pub fn new(name: impl Into<String>, email: impl Into<String>, when: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when,
        }
    }
}

/// Commit fields copied out of the object store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GitCommit {
    /// Full commit SHA (40 hex chars)
    pub sha: String,

    pub author: GitSignature,

    pub committer: GitSignature,

    pub message: String,

    /// SHAs of the parent commits, first parent first
    pub parent_shas: Vec<String>,

    /// SHA of the root tree
    pub tree_sha: String,

    /// Commit timestamp (Unix epoch seconds)
    pub timestamp: i64,
}

impl fmt::Display for GitCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.sha.get(..8).unwrap_or(&self.sha);
        let summary = self.message.lines().next().unwrap_or("");
        write!(f, "{} {}", short, summary)
    }
}

/// Blob identity; the byte stream itself is supplied separately by a reader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GitBlob {
    /// Full blob SHA (40 hex chars)
    pub sha: String,

    /// Size in bytes
    pub size: u64,
}

impl GitBlob {
    pub fn new(sha: impl Into<String>, size: u64) -> Self {
        Self {
            sha: sha.into(),
            size,
        }
    }
}
