//! Tests for the local index store

use anyhow::Result;
use gindex_core::{
    blob_document_id, commit_document_id, DocType, IndexTransport, SubmitStatus,
};
use gindex_db::{IndexCounts, IndexDb};
use tempfile::TempDir;

// ── fixtures ─────────────────────────────────────────────────────────────────

const COMMIT_SHA: &str = "abc1234567890abcdef01234567890abcdef0123";
const BLOB_SHA: &str = "def1234567890abcdef01234567890abcdef0456";

fn open() -> Result<(TempDir, IndexDb)> {
    let tmp = TempDir::new()?;
    let db = IndexDb::open(tmp.path().join("index.db"))?;
    Ok((tmp, db))
}

// ── transport ────────────────────────────────────────────────────────────────

#[test]
fn test_submit_then_exists() -> Result<()> {
    let (_tmp, db) = open()?;
    let id = commit_document_id("repo1", COMMIT_SHA);

    assert!(!db.exists("gin", DocType::Commit, &id)?);
    let resp = db.submit("gin", DocType::Commit, b"{\"Sha\":\"x\"}", &id)?;
    assert_eq!(resp.status, SubmitStatus::Created);
    assert!(resp.body.unwrap().contains("created"));
    assert!(db.exists("gin", DocType::Commit, &id)?);
    Ok(())
}

#[test]
fn test_doc_types_do_not_collide() -> Result<()> {
    let (_tmp, db) = open()?;
    let id = commit_document_id("repo1", COMMIT_SHA);

    db.submit("gin", DocType::Commit, b"c", &id)?;
    assert!(!db.exists("gin", DocType::Blob, &id)?);
    Ok(())
}

#[test]
fn test_indexes_are_separate() -> Result<()> {
    let (_tmp, db) = open()?;
    let id = commit_document_id("repo1", COMMIT_SHA);

    db.submit("first", DocType::Commit, b"c", &id)?;
    assert!(!db.exists("second", DocType::Commit, &id)?);
    Ok(())
}

#[test]
fn test_repeated_submission_is_observably_single() -> Result<()> {
    let (_tmp, db) = open()?;
    let id = blob_document_id("repo1", COMMIT_SHA, "a.txt", BLOB_SHA);

    db.submit("gin", DocType::Blob, b"payload", &id)?;
    let second = db.submit("gin", DocType::Blob, b"payload", &id)?;

    assert_eq!(second.status, SubmitStatus::Updated);
    assert_eq!(db.document_count("gin")?, 1);
    Ok(())
}

#[test]
fn test_empty_index_name_is_rejected() -> Result<()> {
    let (_tmp, db) = open()?;
    let id = commit_document_id("repo1", COMMIT_SHA);
    assert!(db.submit("", DocType::Commit, b"c", &id).is_err());
    Ok(())
}

#[test]
fn test_lookups_do_not_create_indexes() -> Result<()> {
    let (_tmp, db) = open()?;
    let id = commit_document_id("repo1", COMMIT_SHA);

    assert!(db.get("typo", DocType::Commit, &id)?.is_none());
    assert!(!db.exists("typo", DocType::Commit, &id)?);
    assert_eq!(db.document_count("typo")?, 0);
    assert_eq!(db.count_by_type("typo")?, IndexCounts::default());

    assert!(db.index_names().is_empty());
    assert!(db.all_counts()?.is_empty());
    Ok(())
}

// ── stats ────────────────────────────────────────────────────────────────────

#[test]
fn test_counts_per_type_and_index() -> Result<()> {
    let (_tmp, db) = open()?;
    db.put("gin", DocType::Commit, b"c", &commit_document_id("repo1", COMMIT_SHA))?;
    db.put("gin", DocType::Blob, b"b", &blob_document_id("repo1", COMMIT_SHA, "a", BLOB_SHA))?;
    db.put("gin", DocType::Blob, b"b", &blob_document_id("repo1", COMMIT_SHA, "b", BLOB_SHA))?;

    assert_eq!(db.count_by_type("gin")?, IndexCounts { commits: 1, blobs: 2 });
    assert_eq!(db.index_names(), vec!["gin".to_string()]);
    assert_eq!(db.all_counts()?.get("gin"), Some(&IndexCounts { commits: 1, blobs: 2 }));
    Ok(())
}

#[test]
fn test_persists_across_reopen() -> Result<()> {
    let tmp = TempDir::new()?;
    let path = tmp.path().join("index.db");
    let id = commit_document_id("repo1", COMMIT_SHA);
    {
        let db = IndexDb::open(&path)?;
        db.put("gin", DocType::Commit, b"c", &id)?;
        db.flush()?;
    }
    let db = IndexDb::open(&path)?;
    assert!(db.contains("gin", DocType::Commit, &id)?);
    assert!(db.db_size_bytes() > 0);
    Ok(())
}
