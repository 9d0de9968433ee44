//! Shared test doubles

#![allow(dead_code)]

use gindex_core::{
    BlobDocument, CommitDocument, DocType, DocumentId, IndexTransport, SubmitResponse,
    SubmitStatus, TransportError,
};
use gindex_index::BlobReader;
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Mutex;

type Key = (String, DocType, DocumentId);

/// In-memory index with upsert semantics and injectable failures
#[derive(Default)]
pub struct MemoryTransport {
    docs: Mutex<HashMap<Key, Vec<u8>>>,
    submissions: Mutex<usize>,
    lookups: Mutex<usize>,
    reject: Mutex<HashSet<DocumentId>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every submission of `id` fail
    pub fn reject(&self, id: DocumentId) {
        self.reject.lock().unwrap().insert(id);
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn submissions(&self) -> usize {
        *self.submissions.lock().unwrap()
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }

    pub fn payload(&self, index: &str, doc_type: DocType, id: &DocumentId) -> Option<Vec<u8>> {
        self.docs
            .lock()
            .unwrap()
            .get(&(index.to_string(), doc_type, *id))
            .cloned()
    }

    pub fn blob(&self, index: &str, id: &DocumentId) -> Option<BlobDocument> {
        self.payload(index, DocType::Blob, id)
            .map(|p| BlobDocument::deserialize(&p).unwrap())
    }

    pub fn commit(&self, index: &str, id: &DocumentId) -> Option<CommitDocument> {
        self.payload(index, DocType::Commit, id)
            .map(|p| CommitDocument::deserialize(&p).unwrap())
    }
}

impl IndexTransport for MemoryTransport {
    fn submit(
        &self,
        index: &str,
        doc_type: DocType,
        payload: &[u8],
        id: &DocumentId,
    ) -> Result<SubmitResponse, TransportError> {
        *self.submissions.lock().unwrap() += 1;
        if self.reject.lock().unwrap().contains(id) {
            return Err(TransportError::Rejected(format!("{} refused", id)));
        }
        let previous = self
            .docs
            .lock()
            .unwrap()
            .insert((index.to_string(), doc_type, *id), payload.to_vec());
        let status = if previous.is_some() {
            SubmitStatus::Updated
        } else {
            SubmitStatus::Created
        };
        Ok(SubmitResponse::new(status))
    }

    fn exists(&self, index: &str, doc_type: DocType, id: &DocumentId) -> Result<bool, TransportError> {
        *self.lookups.lock().unwrap() += 1;
        Ok(self
            .docs
            .lock()
            .unwrap()
            .contains_key(&(index.to_string(), doc_type, *id)))
    }
}

/// Blob whose content can be sniffed but not read in full
pub struct BrokenReader(pub Vec<u8>);

impl BlobReader for BrokenReader {
    fn sniff(&self, limit: usize) -> io::Result<Vec<u8>> {
        self.0.sniff(limit)
    }

    fn read_all(&self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated object"))
    }
}

/// Blob that cannot be read at all
pub struct UnreadableReader;

impl BlobReader for UnreadableReader {
    fn sniff(&self, _limit: usize) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::Other, "object store offline"))
    }

    fn read_all(&self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::Other, "object store offline"))
    }
}

/// Records how much of the blob was requested
#[derive(Default)]
pub struct CountingReader {
    pub content: Vec<u8>,
    pub sniffed: Mutex<Option<usize>>,
    pub full_reads: Mutex<usize>,
}

impl CountingReader {
    pub fn new(content: &[u8]) -> Self {
        Self {
            content: content.to_vec(),
            ..Default::default()
        }
    }
}

impl BlobReader for CountingReader {
    fn sniff(&self, limit: usize) -> io::Result<Vec<u8>> {
        *self.sniffed.lock().unwrap() = Some(limit);
        self.content.sniff(limit)
    }

    fn read_all(&self) -> io::Result<Vec<u8>> {
        *self.full_reads.lock().unwrap() += 1;
        Ok(self.content.clone())
    }
}
