//! Seam between the pipeline and whatever stores the documents

use crate::document::DocType;
use crate::error::TransportError;
use crate::identity::DocumentId;

/// Effect of a submission on the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Created,
    Updated,
}

/// Backend reply to a submission; only used for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: SubmitStatus,
    pub body: Option<String>,
}

impl SubmitResponse {
    pub fn new(status: SubmitStatus) -> Self {
        Self { status, body: None }
    }
}

/// Index backend.
///
/// Submitting under an existing id replaces the stored document. One
/// transport is shared by every indexing thread.
pub trait IndexTransport: Send + Sync {
    fn submit(
        &self,
        index: &str,
        doc_type: DocType,
        payload: &[u8],
        id: &DocumentId,
    ) -> Result<SubmitResponse, TransportError>;

    fn exists(&self, index: &str, doc_type: DocType, id: &DocumentId) -> Result<bool, TransportError>;
}

impl<T: IndexTransport + ?Sized> IndexTransport for std::sync::Arc<T> {
    fn submit(
        &self,
        index: &str,
        doc_type: DocType,
        payload: &[u8],
        id: &DocumentId,
    ) -> Result<SubmitResponse, TransportError> {
        (**self).submit(index, doc_type, payload, id)
    }

    fn exists(&self, index: &str, doc_type: DocType, id: &DocumentId) -> Result<bool, TransportError> {
        (**self).exists(index, doc_type, id)
    }
}
