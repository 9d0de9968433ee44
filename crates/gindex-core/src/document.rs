//! Index documents built from native repository objects
//!
//! The native object is held by composition and flattened into the
//! serialized form, so a stored commit document carries `Sha`, `Author`, ...
//! next to `RepositoryId` and `IndexingTime`. Field names are the index
//! contract; renaming one breaks documents that are already indexed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocumentError;
use crate::identity::{blob_document_id, commit_document_id, DocumentId};
use crate::models::{GitBlob, GitCommit};

/// Document type name used by the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Commit,
    Blob,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Commit => "commit",
            DocType::Blob => "blob",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit" => Ok(DocType::Commit),
            "blob" => Ok(DocType::Blob),
            other => Err(format!("Unknown document type: {}", other)),
        }
    }
}

/// Commit as stored in the index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CommitDocument {
    #[serde(flatten)]
    pub commit: GitCommit,

    /// Logical repository identifier (e.g. "owner/name")
    pub repository_id: String,

    /// Storage-level repository identifier
    #[serde(default)]
    pub source_repository_id: i64,

    /// When this document was produced
    pub indexing_time: DateTime<Utc>,
}

impl CommitDocument {
    /// Wraps a commit and stamps the indexing time
    pub fn from_git(commit: GitCommit, repository_id: impl Into<String>) -> Self {
        Self {
            commit,
            repository_id: repository_id.into(),
            source_repository_id: 0,
            indexing_time: Utc::now(),
        }
    }

    pub fn with_source_repository_id(mut self, id: i64) -> Self {
        self.source_repository_id = id;
        self
    }

    pub fn document_id(&self) -> DocumentId {
        commit_document_id(&self.repository_id, &self.commit.sha)
    }

    pub fn serialize(&self) -> Result<Vec<u8>, DocumentError> {
        serde_json::to_vec(self).map_err(DocumentError::Serialize)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, DocumentError> {
        serde_json::from_slice(bytes).map_err(DocumentError::Deserialize)
    }
}

/// One occurrence of a blob at a path in a commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct BlobDocument {
    #[serde(flatten)]
    pub blob: GitBlob,

    pub repository_id: String,

    /// Numeric document id assigned by the caller
    #[serde(default)]
    pub id: i64,

    /// Internal id of the originating repository
    #[serde(default)]
    pub source_repository_id: i64,

    /// Commit in which the blob was encountered
    pub commit_sha: String,

    /// Path of the blob at that commit
    pub path: String,

    /// Ordinal of the blob within its commit
    #[serde(default)]
    pub oid: i64,

    pub indexing_time: DateTime<Utc>,

    /// Extracted text; only present for text-like blobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl BlobDocument {
    /// Wraps a blob and stamps the indexing time.
    ///
    /// Commit and path are set with [`BlobDocument::at`] before indexing.
    pub fn from_git(blob: GitBlob, repository_id: impl Into<String>) -> Self {
        Self {
            blob,
            repository_id: repository_id.into(),
            id: 0,
            source_repository_id: 0,
            commit_sha: String::new(),
            path: String::new(),
            oid: 0,
            indexing_time: Utc::now(),
            content: None,
        }
    }

    /// Places the blob at `path` in `commit_sha`
    pub fn at(mut self, commit_sha: impl Into<String>, path: impl Into<String>) -> Self {
        self.commit_sha = commit_sha.into();
        self.path = path.into();
        self
    }

    pub fn with_source_repository_id(mut self, id: i64) -> Self {
        self.source_repository_id = id;
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_oid(mut self, oid: i64) -> Self {
        self.oid = oid;
        self
    }

    pub fn document_id(&self) -> DocumentId {
        blob_document_id(
            &self.repository_id,
            &self.commit_sha,
            &self.path,
            &self.blob.sha,
        )
    }

    pub fn serialize(&self) -> Result<Vec<u8>, DocumentError> {
        serde_json::to_vec(self).map_err(DocumentError::Serialize)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, DocumentError> {
        serde_json::from_slice(bytes).map_err(DocumentError::Deserialize)
    }
}

/// Closed set of indexable documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Commit(CommitDocument),
    Blob(BlobDocument),
}

impl Document {
    pub fn doc_type(&self) -> DocType {
        match self {
            Document::Commit(_) => DocType::Commit,
            Document::Blob(_) => DocType::Blob,
        }
    }

    pub fn document_id(&self) -> DocumentId {
        match self {
            Document::Commit(doc) => doc.document_id(),
            Document::Blob(doc) => doc.document_id(),
        }
    }

    pub fn repository_id(&self) -> &str {
        match self {
            Document::Commit(doc) => &doc.repository_id,
            Document::Blob(doc) => &doc.repository_id,
        }
    }

    /// SHA of the wrapped native object
    pub fn object_sha(&self) -> &str {
        match self {
            Document::Commit(doc) => &doc.commit.sha,
            Document::Blob(doc) => &doc.blob.sha,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Document::Commit(_) => None,
            Document::Blob(doc) => Some(&doc.path),
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, DocumentError> {
        match self {
            Document::Commit(doc) => doc.serialize(),
            Document::Blob(doc) => doc.serialize(),
        }
    }

    /// Decodes a stored payload of the given type
    pub fn deserialize(doc_type: DocType, bytes: &[u8]) -> Result<Self, DocumentError> {
        match doc_type {
            DocType::Commit => CommitDocument::deserialize(bytes).map(Document::Commit),
            DocType::Blob => BlobDocument::deserialize(bytes).map(Document::Blob),
        }
    }
}

impl From<CommitDocument> for Document {
    fn from(doc: CommitDocument) -> Self {
        Document::Commit(doc)
    }
}

impl From<BlobDocument> for Document {
    fn from(doc: BlobDocument) -> Self {
        Document::Blob(doc)
    }
}
