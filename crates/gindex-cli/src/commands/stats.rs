//! Stats command implementation

use anyhow::Result;
use colored::Colorize;
use gindex_db::IndexDb;
use tabled::settings::Style;
use tabled::Table;

use crate::output::IndexRow;

/// Displays per-index document counts
pub fn cmd_stats(db: IndexDb) -> Result<()> {
    let counts = db.all_counts()?;

    println!("{}", "Index Statistics:".bright_cyan().bold());
    if counts.is_empty() {
        println!("  {}", "No documents indexed yet".yellow());
    } else {
        let rows: Vec<IndexRow> = counts
            .into_iter()
            .map(|(index, c)| IndexRow {
                index,
                commits: c.commits,
                blobs: c.blobs,
                total: c.commits + c.blobs,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    let size_mb = db.db_size_bytes() as f64 / (1024.0 * 1024.0);
    println!("  {}: {:.2} MiB", "Database size".bright_yellow(), size_mb);
    Ok(())
}
