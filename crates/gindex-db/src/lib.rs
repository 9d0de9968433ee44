//! gindex DB - Local index storage
//!
//! This crate keeps index documents in a Sled database and implements the
//! [`gindex_core::IndexTransport`] seam on top of it, so repositories can be
//! indexed without an external search server. Submissions are upserts keyed
//! by document id.

mod database;

pub use database::{IndexCounts, IndexDb, StoredDocument};

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use gindex_core::{commit_document_id, DocType, SubmitStatus};
    use tempfile::TempDir;

    #[test]
    fn test_put_and_get() -> Result<()> {
        let tmp = TempDir::new()?;
        let db = IndexDb::open(tmp.path())?;
        let id = commit_document_id("repo1", "abcd");

        db.put("gin", DocType::Commit, b"{}", &id)?;
        let stored = db.get("gin", DocType::Commit, &id)?.unwrap();

        assert_eq!(stored.payload, b"{}");
        assert_eq!(stored.doc_type, DocType::Commit);
        Ok(())
    }

    #[test]
    fn test_put_twice_is_upsert() -> Result<()> {
        let tmp = TempDir::new()?;
        let db = IndexDb::open(tmp.path())?;
        let id = commit_document_id("repo1", "abcd");

        assert_eq!(db.put("gin", DocType::Commit, b"old", &id)?, SubmitStatus::Created);
        assert_eq!(db.put("gin", DocType::Commit, b"new", &id)?, SubmitStatus::Updated);

        assert_eq!(db.document_count("gin")?, 1);
        assert_eq!(db.get("gin", DocType::Commit, &id)?.unwrap().payload, b"new");
        Ok(())
    }
}
