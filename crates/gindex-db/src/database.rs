//! Sled-backed document index

use anyhow::{Context, Result};
use gindex_core::{DocType, DocumentId, IndexTransport, SubmitResponse, SubmitStatus, TransportError};
use serde::{Deserialize, Serialize};
use sled::Db;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

// ---------------------------------------------------------------------------
// Stored envelope
// ---------------------------------------------------------------------------

/// What sled keeps for every document. The payload is the serialized
/// document exactly as submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredDocument {
    pub doc_type: DocType,
    pub payload: Vec<u8>,
    /// Unix epoch seconds of the last submission
    pub stored_at: u64,
}

fn pack(doc: &StoredDocument) -> Result<Vec<u8>> {
    bincode::serialize(doc).context("Failed to serialize StoredDocument")
}

fn unpack(bytes: &[u8]) -> Result<StoredDocument> {
    bincode::deserialize(bytes).context("Failed to deserialize StoredDocument")
}

/// Key format: "<doctype>:<hex id>"
fn document_key(doc_type: DocType, id: &DocumentId) -> String {
    format!("{}:{}", doc_type, id)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Per-index document counts
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexCounts {
    pub commits: usize,
    pub blobs: usize,
}

/// Local index; one sled tree per index name
pub struct IndexDb {
    db: Db,

    /// Path to the database directory (for size calculation)
    path: PathBuf,
}

impl IndexDb {
    /// Opens or creates a database at the specified location
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path.as_ref())
            .with_context(|| format!("Failed to open database at {:?}", path.as_ref()))?;

        Ok(Self {
            db,
            path: path.as_ref().to_path_buf(),
        })
    }

    fn tree(&self, index: &str) -> Result<sled::Tree> {
        if index.is_empty() {
            anyhow::bail!("Index name must not be empty");
        }
        self.db
            .open_tree(index)
            .with_context(|| format!("Failed to open index tree {:?}", index))
    }

    /// Opens the tree of an index only if it was created by an earlier `put`.
    /// Read paths use this so lookups never create indexes.
    fn existing_tree(&self, index: &str) -> Result<Option<sled::Tree>> {
        let exists = self
            .db
            .tree_names()
            .iter()
            .any(|name| &name[..] == index.as_bytes());
        if !exists {
            return Ok(None);
        }
        self.tree(index).map(Some)
    }

    /// Stores `payload` under `id`, replacing any previous version
    pub fn put(
        &self,
        index: &str,
        doc_type: DocType,
        payload: &[u8],
        id: &DocumentId,
    ) -> Result<SubmitStatus> {
        let tree = self.tree(index)?;
        let stored = StoredDocument {
            doc_type,
            payload: payload.to_vec(),
            stored_at: now_secs(),
        };
        let key = document_key(doc_type, id);
        let previous = tree
            .insert(key.as_bytes(), pack(&stored)?)
            .with_context(|| format!("Failed to store document {}", key))?;

        if previous.is_some() {
            log::debug!("Replaced {} in {}", key, index);
            Ok(SubmitStatus::Updated)
        } else {
            Ok(SubmitStatus::Created)
        }
    }

    /// Retrieves a document envelope by type and id
    pub fn get(&self, index: &str, doc_type: DocType, id: &DocumentId) -> Result<Option<StoredDocument>> {
        let Some(tree) = self.existing_tree(index)? else {
            return Ok(None);
        };
        let key = document_key(doc_type, id);
        match tree.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(unpack(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Checks whether a document exists without decoding it
    pub fn contains(&self, index: &str, doc_type: DocType, id: &DocumentId) -> Result<bool> {
        let Some(tree) = self.existing_tree(index)? else {
            return Ok(false);
        };
        let key = document_key(doc_type, id);
        Ok(tree.contains_key(key.as_bytes())?)
    }

    /// Returns the total number of documents in an index
    pub fn document_count(&self, index: &str) -> Result<usize> {
        Ok(self.existing_tree(index)?.map_or(0, |tree| tree.len()))
    }

    /// Counts documents per type. Scans keys only.
    pub fn count_by_type(&self, index: &str) -> Result<IndexCounts> {
        let Some(tree) = self.existing_tree(index)? else {
            return Ok(IndexCounts::default());
        };
        Ok(IndexCounts {
            commits: tree.scan_prefix(b"commit:").keys().count(),
            blobs: tree.scan_prefix(b"blob:").keys().count(),
        })
    }

    /// Names of all indexes created so far
    pub fn index_names(&self) -> Vec<String> {
        self.db
            .tree_names()
            .into_iter()
            .filter(|name| &name[..] != b"__sled__default")
            .map(|name| String::from_utf8_lossy(&name).into_owned())
            .collect()
    }

    /// Document counts of every index, keyed by index name
    pub fn all_counts(&self) -> Result<BTreeMap<String, IndexCounts>> {
        let mut counts = BTreeMap::new();
        for name in self.index_names() {
            let c = self.count_by_type(&name)?;
            counts.insert(name, c);
        }
        Ok(counts)
    }

    /// Returns total on-disk size of the database directory in bytes.
    pub fn db_size_bytes(&self) -> u64 {
        fn dir_size(path: &Path) -> u64 {
            let Ok(entries) = std::fs::read_dir(path) else { return 0; };
            entries.flatten().map(|e| {
                let p = e.path();
                if p.is_dir() {
                    dir_size(&p)
                } else {
                    e.metadata().map(|m| m.len()).unwrap_or(0)
                }
            }).sum()
        }
        dir_size(&self.path)
    }

    /// Flushes all pending operations to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush().context("Failed to flush database")?;
        Ok(())
    }
}

impl IndexTransport for IndexDb {
    fn submit(
        &self,
        index: &str,
        doc_type: DocType,
        payload: &[u8],
        id: &DocumentId,
    ) -> Result<SubmitResponse, TransportError> {
        let status = self
            .put(index, doc_type, payload, id)
            .map_err(|e| TransportError::Rejected(format!("{:#}", e)))?;
        let verb = match status {
            SubmitStatus::Created => "created",
            SubmitStatus::Updated => "updated",
        };
        Ok(SubmitResponse {
            status,
            body: Some(format!("{} {}:{} in {}", verb, doc_type, id, index)),
        })
    }

    fn exists(&self, index: &str, doc_type: DocType, id: &DocumentId) -> Result<bool, TransportError> {
        self.contains(index, doc_type, id)
            .map_err(|e| TransportError::Unavailable(format!("{:#}", e)))
    }
}
