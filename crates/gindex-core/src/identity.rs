//! Document identifiers
//!
//! An identifier is the SHA-1 of the logical coordinates of an object,
//! concatenated without separators:
//!
//! - commit: `repository_id ++ commit_sha`
//! - blob:   `repository_id ++ commit_sha ++ path ++ blob_sha`
//!
//! Blob identifiers include the commit and path so that the same blob seen at
//! several paths or commits yields one document per occurrence. The order is
//! part of the index contract and must not change.

use data_encoding::HEXLOWER;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// Fixed-size (160-bit) key of a document in the index
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; 20]);

impl DocumentId {
    pub const LEN: usize = 20;

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex rendering (40 chars)
    pub fn to_hex(&self) -> String {
        HEXLOWER.encode(&self.0)
    }

    fn digest(parts: &[&str]) -> Self {
        let mut hasher = Sha1::new();
        for part in parts {
            hasher.update(part.as_bytes());
        }
        Self(hasher.finalize().into())
    }
}

/// Identifier of a commit document
pub fn commit_document_id(repository_id: &str, commit_sha: &str) -> DocumentId {
    DocumentId::digest(&[repository_id, commit_sha])
}

/// Identifier of a blob document for one (commit, path) occurrence
pub fn blob_document_id(
    repository_id: &str,
    commit_sha: &str,
    path: &str,
    blob_sha: &str,
) -> DocumentId {
    DocumentId::digest(&[repository_id, commit_sha, path, blob_sha])
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.to_hex())
    }
}

/// Error parsing a hex document identifier
#[derive(Debug, thiserror::Error)]
#[error("Invalid document id {0:?}: expected 40 hex chars")]
pub struct ParseDocumentIdError(String);

impl FromStr for DocumentId {
    type Err = ParseDocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = HEXLOWER
            .decode(s.to_ascii_lowercase().as_bytes())
            .map_err(|_| ParseDocumentIdError(s.to_string()))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| ParseDocumentIdError(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
