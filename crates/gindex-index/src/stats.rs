//! Indexing statistics

use std::fmt;
use std::time::Duration;

use crate::pipeline::IndexOutcome;

/// Counters of one indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub commits_indexed: usize,
    pub commits_skipped: usize,
    pub blobs_indexed: usize,
    pub blobs_skipped: usize,
    /// Blob documents submitted with extracted text
    pub blobs_with_content: usize,
    /// Objects that failed; each is logged with its coordinates
    pub errors: usize,
    pub elapsed_time: Duration,
}

impl IndexStats {
    pub(crate) fn record_commit(&mut self, outcome: IndexOutcome) {
        match outcome {
            IndexOutcome::Submitted { .. } => self.commits_indexed += 1,
            IndexOutcome::Skipped => self.commits_skipped += 1,
        }
    }

    pub(crate) fn record_blob(&mut self, outcome: IndexOutcome) {
        match outcome {
            IndexOutcome::Submitted { with_content, .. } => {
                self.blobs_indexed += 1;
                if with_content {
                    self.blobs_with_content += 1;
                }
            }
            IndexOutcome::Skipped => self.blobs_skipped += 1,
        }
    }

    /// Adds the counters of `other`; elapsed time is left alone
    pub(crate) fn merge(&mut self, other: &IndexStats) {
        self.commits_indexed += other.commits_indexed;
        self.commits_skipped += other.commits_skipped;
        self.blobs_indexed += other.blobs_indexed;
        self.blobs_skipped += other.blobs_skipped;
        self.blobs_with_content += other.blobs_with_content;
        self.errors += other.errors;
    }

    pub fn commits_seen(&self) -> usize {
        self.commits_indexed + self.commits_skipped
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Commits: {} indexed, {} skipped | Blobs: {} indexed ({} with content), {} skipped | {} errors | Time: {}",
            self.commits_indexed,
            self.commits_skipped,
            self.blobs_indexed,
            self.blobs_with_content,
            self.blobs_skipped,
            self.errors,
            format_duration(self.elapsed_time)
        )
    }
}

/// Formats a duration in human-readable format
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    match secs {
        0..=59 => format!("{:.1}s", d.as_secs_f64()),
        60..=3599 => format!("{}m {}s", secs / 60, secs % 60),
        _ => format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60),
    }
}
