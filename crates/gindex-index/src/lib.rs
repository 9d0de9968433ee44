//! gindex Index - Turns repository objects into index documents
//!
//! This crate is responsible for:
//! - Classifying blobs and extracting their text
//! - Running commits and blobs through the indexing pipeline
//! - Walking a Git repository's history in parallel batches

pub mod classify;
pub mod reader;
mod indexer;
mod pipeline;
mod processing;
mod stats;

pub use classify::{Classifier, FileType, DEFAULT_SNIFF_LEN};
pub use indexer::{git_commit, Indexer, IndexerOptions};
pub use pipeline::{IndexOutcome, Pipeline, PipelineConfig};
pub use reader::BlobReader;
pub use stats::{format_duration, IndexStats};
