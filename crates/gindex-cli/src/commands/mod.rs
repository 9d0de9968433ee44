//! Command implementations

mod id;
mod index;
mod show;
mod stats;

pub use id::{cmd_id, IdTarget};
pub use index::{cmd_index, IndexArgs};
pub use show::cmd_show;
pub use stats::cmd_stats;
