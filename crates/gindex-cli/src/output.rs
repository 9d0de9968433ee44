//! Output formatting structures for CLI display

use tabled::Tabled;

/// Table row for per-index document counts
#[derive(Tabled)]
pub struct IndexRow {
    #[tabled(rename = "Index")]
    pub index: String,
    #[tabled(rename = "Commits")]
    pub commits: usize,
    #[tabled(rename = "Blobs")]
    pub blobs: usize,
    #[tabled(rename = "Total")]
    pub total: usize,
}
