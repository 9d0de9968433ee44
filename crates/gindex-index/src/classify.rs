//! Blob content classification
//!
//! Flow:
//!   1. Decisive extensions are answered from the path alone
//!   2. Anything else gets a bounded sniff of the first bytes

use anyhow::{Context, Result};
use gindex_core::ClassificationError;
use regex::bytes::Regex;
use std::path::Path;
use std::sync::Arc;

use crate::reader::BlobReader;

/// Default number of bytes inspected when the path is not decisive
pub const DEFAULT_SNIFF_LEN: usize = 1024;

/// Share of control bytes above which a sniff is treated as binary
const NON_PRINTABLE_THRESHOLD: f64 = 0.3;

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rst", "org", "tex", "bib", "csv", "tsv", "json", "yaml", "yml",
    "toml", "ini", "cfg", "conf", "html", "htm", "css", "svg", "py", "r", "m", "jl", "rs", "go",
    "c", "h", "cc", "cpp", "hpp", "java", "js", "ts", "sh", "bash", "sql", "log", "ipynb",
];

const BINARY_EXTENSIONS: &[&str] = &[
    "bin", "dat", "raw", "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "ico", "pdf", "zip",
    "gz", "tgz", "bz2", "xz", "7z", "tar", "exe", "dll", "so", "o", "a", "class", "jar", "pyc",
    "mat", "h5", "hdf5", "nii", "npy", "npz", "abf", "smr", "mp3", "mp4", "wav", "avi",
];

/// File type categories driving content extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    /// odML metadata document (XML)
    OdmlXml,
    Binary,
}

impl FileType {
    /// Whether blobs of this type get their content indexed
    pub fn has_content(&self) -> bool {
        matches!(self, FileType::Text | FileType::OdmlXml)
    }
}

/// Path and content based classifier.
///
/// Holds only compiled, immutable state; cheap to clone and share.
#[derive(Debug, Clone)]
pub struct Classifier {
    sniff_len: usize,
    odml_root: Arc<Regex>,
}

impl Classifier {
    pub fn new(sniff_len: usize) -> Result<Self> {
        // "<odML>" or "<odML version=...>", also after an XML prolog
        let odml_root = Regex::new(r"<odML[\s>/]")
            .context("Failed to compile odML root regex")?;
        Ok(Self {
            sniff_len: sniff_len.max(1),
            odml_root: Arc::new(odml_root),
        })
    }

    pub fn sniff_len(&self) -> usize {
        self.sniff_len
    }

    /// Classifies a blob found at `path`.
    ///
    /// Reads at most `sniff_len` bytes, and none at all when the extension
    /// is decisive.
    pub fn classify<R: BlobReader + ?Sized>(
        &self,
        path: &str,
        reader: &R,
    ) -> std::result::Result<FileType, ClassificationError> {
        let file_name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ClassificationError::Path(path.to_string()))?;

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        if let Some(ext) = extension.as_deref() {
            if let Some(file_type) = classify_extension(ext) {
                return Ok(file_type);
            }
        }

        let head = reader
            .sniff(self.sniff_len)
            .map_err(|source| ClassificationError::Sniff {
                path: path.to_string(),
                source,
            })?;

        Ok(self.classify_sniff(&head))
    }

    /// Classifies the leading bytes of a blob
    pub fn classify_sniff(&self, head: &[u8]) -> FileType {
        if looks_binary(head) {
            FileType::Binary
        } else if self.odml_root.is_match(head) {
            FileType::OdmlXml
        } else {
            FileType::Text
        }
    }
}

/// `None` when the extension alone does not settle the type (e.g. `.xml`)
fn classify_extension(ext: &str) -> Option<FileType> {
    if ext == "odml" {
        Some(FileType::OdmlXml)
    } else if TEXT_EXTENSIONS.contains(&ext) {
        Some(FileType::Text)
    } else if BINARY_EXTENSIONS.contains(&ext) {
        Some(FileType::Binary)
    } else {
        None
    }
}

fn looks_binary(head: &[u8]) -> bool {
    if head.is_empty() {
        return false;
    }
    if head.contains(&0) {
        return true;
    }
    // A multi-byte char cut off by the sniff boundary is not an error
    if let Err(e) = std::str::from_utf8(head) {
        if e.error_len().is_some() {
            return true;
        }
    }
    let non_printable = head
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\n' && b != b'\r' && b != b'\t')
        .count();
    (non_printable as f64 / head.len() as f64) > NON_PRINTABLE_THRESHOLD
}
