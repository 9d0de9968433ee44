//! Show command implementation

use anyhow::{Context, Result};
use gindex_core::{DocType, Document, DocumentId};
use gindex_db::IndexDb;

/// Loads a stored document, decodes it and prints it as pretty JSON
pub fn cmd_show(index: String, doc_type: String, id: String, db: IndexDb) -> Result<()> {
    let doc_type: DocType = doc_type.parse().map_err(anyhow::Error::msg)?;
    let id: DocumentId = id.parse()?;

    let Some(stored) = db.get(&index, doc_type, &id)? else {
        anyhow::bail!("No {} document {} in index {:?}", doc_type, id, index);
    };

    let document = Document::deserialize(doc_type, &stored.payload)
        .with_context(|| format!("Stored {} {} is not a valid document", doc_type, id))?;

    let json = match &document {
        Document::Commit(doc) => serde_json::to_string_pretty(doc)?,
        Document::Blob(doc) => serde_json::to_string_pretty(doc)?,
    };
    println!("{}", json);
    Ok(())
}
