//! Object-to-document indexing pipeline
//!
//! One call handles one object: build the document, extract content, encode,
//! derive the id and submit. Nothing is shared between calls except the
//! transport, so a single `Pipeline` can serve any number of threads.

use anyhow::Result;
use gindex_core::{
    BlobDocument, CommitDocument, Document, GitBlob, GitCommit, IndexError, IndexErrorKind,
    IndexTransport, SubmitStatus,
};

use crate::classify::{Classifier, FileType, DEFAULT_SNIFF_LEN};
use crate::reader::BlobReader;

/// Settings shared by every object of one indexing run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Name of the target index
    pub index: String,

    /// Logical repository identifier, part of every document id
    pub repository_id: String,

    /// Storage-level repository identifier copied into documents
    pub source_repository_id: i64,

    /// Bytes inspected when a path is not decisive for classification
    pub sniff_len: usize,

    /// Look documents up before submitting and leave existing ones alone
    pub skip_existing: bool,
}

impl PipelineConfig {
    pub fn new(index: impl Into<String>, repository_id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            repository_id: repository_id.into(),
            source_repository_id: 0,
            sniff_len: DEFAULT_SNIFF_LEN,
            skip_existing: false,
        }
    }
}

/// Result of indexing one object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    Submitted {
        status: SubmitStatus,
        /// Blob documents only: whether content was extracted
        with_content: bool,
    },
    /// Already present and `skip_existing` is set
    Skipped,
}

pub struct Pipeline<T> {
    config: PipelineConfig,
    classifier: Classifier,
    transport: T,
}

impl<T: IndexTransport> Pipeline<T> {
    pub fn new(config: PipelineConfig, transport: T) -> Result<Self> {
        let classifier = Classifier::new(config.sniff_len)?;
        Ok(Self {
            config,
            classifier,
            transport,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Indexes one commit
    pub fn index_commit(&self, commit: &GitCommit) -> Result<IndexOutcome, IndexError> {
        let doc = CommitDocument::from_git(commit.clone(), self.config.repository_id.as_str())
            .with_source_repository_id(self.config.source_repository_id);
        let doc = Document::Commit(doc);

        if self.config.skip_existing && self.is_in_index(&doc)? {
            log::debug!("Commit {} already indexed", commit.sha);
            return Ok(IndexOutcome::Skipped);
        }

        let status = self.submit(&doc)?;
        Ok(IndexOutcome::Submitted {
            status,
            with_content: false,
        })
    }

    /// Indexes one occurrence of a blob at `path` in `commit_sha`
    pub fn index_blob<R: BlobReader + ?Sized>(
        &self,
        blob: &GitBlob,
        reader: &R,
        commit_sha: &str,
        path: &str,
    ) -> Result<IndexOutcome, IndexError> {
        let doc = BlobDocument::from_git(blob.clone(), self.config.repository_id.as_str())
            .at(commit_sha, path);
        self.index_blob_document(doc, reader)
    }

    /// Indexes a prepared blob document under the configured repository,
    /// replacing the document's `repository_id` and `source_repository_id`.
    ///
    /// Commit, path and the caller's bookkeeping ids are kept from `doc`; the
    /// content is filled in from `reader`.
    pub fn index_blob_document<R: BlobReader + ?Sized>(
        &self,
        mut doc: BlobDocument,
        reader: &R,
    ) -> Result<IndexOutcome, IndexError> {
        if doc.repository_id != self.config.repository_id {
            log::debug!(
                "Blob {} prepared for {:?}, indexing under {:?}",
                doc.blob.sha,
                doc.repository_id,
                self.config.repository_id
            );
        }
        doc.repository_id = self.config.repository_id.clone();
        doc.source_repository_id = self.config.source_repository_id;
        doc.content = None;

        if self.config.skip_existing && self.is_in_index(&Document::Blob(doc.clone()))? {
            log::debug!("Blob {} at {} already indexed", doc.blob.sha, doc.path);
            return Ok(IndexOutcome::Skipped);
        }

        match self.classifier.classify(&doc.path, reader) {
            Ok(file_type) if file_type.has_content() => {
                if file_type == FileType::OdmlXml {
                    log::debug!("odML document found at {}", doc.path);
                }
                let bytes = reader.read_all().map_err(|source| {
                    IndexError::new(
                        IndexErrorKind::Read,
                        &doc.repository_id,
                        &doc.blob.sha,
                        Some(&doc.path),
                        gindex_core::ContentReadError {
                            sha: doc.blob.sha.clone(),
                            source,
                        },
                    )
                })?;
                doc.content = Some(decode_text(bytes));
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Could not determine file type of {}: {}", doc.path, e);
            }
        }

        let with_content = doc.content.is_some();
        let status = self.submit(&Document::Blob(doc))?;
        Ok(IndexOutcome::Submitted {
            status,
            with_content,
        })
    }

    /// Asks the transport whether `doc` is already stored
    pub fn is_in_index(&self, doc: &Document) -> Result<bool, IndexError> {
        self.transport
            .exists(&self.config.index, doc.doc_type(), &doc.document_id())
            .map_err(|e| self.error(IndexErrorKind::Transport, doc, e))
    }

    fn submit(&self, doc: &Document) -> Result<SubmitStatus, IndexError> {
        let payload = doc
            .serialize()
            .map_err(|e| self.error(IndexErrorKind::Serialize, doc, e))?;
        let id = doc.document_id();

        let response = self
            .transport
            .submit(&self.config.index, doc.doc_type(), &payload, &id)
            .map_err(|e| self.error(IndexErrorKind::Transport, doc, e))?;

        log::debug!(
            "Tried adding {} {} to {}: {:?} {}",
            doc.doc_type(),
            id,
            self.config.index,
            response.status,
            response.body.as_deref().unwrap_or("")
        );
        Ok(response.status)
    }

    fn error(
        &self,
        kind: IndexErrorKind,
        doc: &Document,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> IndexError {
        IndexError::new(kind, doc.repository_id(), doc.object_sha(), doc.path(), source)
    }
}

/// Text content of a blob; invalid sequences past the sniff are replaced
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
