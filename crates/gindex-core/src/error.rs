//! Error types shared by the indexing pipeline and its collaborators

use std::fmt;

/// The blob's file type could not be determined.
///
/// Never fatal: the pipeline indexes the document without content.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("Unusable path for classification: {0:?}")]
    Path(String),

    #[error("Failed to sniff content of {path}: {source}")]
    Sniff {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Full content of a blob classified as text could not be read
#[derive(Debug, thiserror::Error)]
#[error("Failed to read content of blob {sha}: {source}")]
pub struct ContentReadError {
    pub sha: String,
    #[source]
    pub source: std::io::Error,
}

/// Failure reported by an index transport
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Index backend unavailable: {0}")]
    Unavailable(String),

    #[error("Index backend rejected document: {0}")]
    Rejected(String),
}

/// Document (de)serialization failure
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to deserialize document: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// Stage of the pipeline an object failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorKind {
    Serialize,
    Read,
    Transport,
}

impl fmt::Display for IndexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexErrorKind::Serialize => "serialize",
            IndexErrorKind::Read => "read",
            IndexErrorKind::Transport => "transport",
        };
        f.write_str(name)
    }
}

/// Failure to index a single object.
///
/// Carries enough context to re-index exactly the object that failed.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error indexing {object_sha} in {repository_id}{}: {source}", path_suffix(.path))]
pub struct IndexError {
    pub kind: IndexErrorKind,
    pub repository_id: String,
    pub object_sha: String,
    pub path: Option<String>,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

fn path_suffix(path: &Option<String>) -> String {
    match path {
        Some(p) => format!(" at {}", p),
        None => String::new(),
    }
}

impl IndexError {
    pub fn new(
        kind: IndexErrorKind,
        repository_id: &str,
        object_sha: &str,
        path: Option<&str>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            kind,
            repository_id: repository_id.to_string(),
            object_sha: object_sha.to_string(),
            path: path.map(str::to_string),
            source: source.into(),
        }
    }
}
