//! Repository traversal
//!
//! - Main indexing workflow (indexing.rs)
//! - Batch commit processing (commit.rs)
//! - Individual blob processing (blob.rs)

mod blob;
mod commit;
mod indexing;
