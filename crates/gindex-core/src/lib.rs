//! gindex Core - Shared document model for repository indexing
//!
//! This crate defines the data structures used throughout the project:
//! native git objects, the commit and blob index documents wrapping them,
//! the document identity scheme and the index transport seam.

mod document;
mod error;
mod identity;
mod models;
mod transport;

pub use document::{BlobDocument, CommitDocument, DocType, Document};
pub use error::{
    ClassificationError, ContentReadError, DocumentError, IndexError, IndexErrorKind,
    TransportError,
};
pub use identity::{blob_document_id, commit_document_id, DocumentId, ParseDocumentIdError};
pub use models::{GitBlob, GitCommit, GitSignature};
pub use transport::{IndexTransport, SubmitResponse, SubmitStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_names() {
        assert_eq!(DocType::Commit.as_str(), "commit");
        assert_eq!("blob".parse::<DocType>().unwrap(), DocType::Blob);
        assert!("tree".parse::<DocType>().is_err());
    }

    #[test]
    fn test_blob_document_id_uses_occurrence() {
        let doc = BlobDocument::from_git(GitBlob::new("ef01", 5), "repo1")
            .at("abcd", "data/notes.txt");
        assert_eq!(
            doc.document_id(),
            blob_document_id("repo1", "abcd", "data/notes.txt", "ef01")
        );
    }
}
