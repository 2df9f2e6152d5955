//! Bulk JSON import for the corkboard system.
//!
//! Takes a parsed [`ImportDocument`] and materializes its nested
//! epic/story/task tree into flat item records through the
//! [`Storage`](corkboard_storage::Storage) trait, tolerating and tallying
//! per-node failures without aborting the whole run.
//!
//! [`ImportDocument`]: corkboard_core::document::ImportDocument

pub mod engine;
pub mod report;

pub use engine::{ImportEngine, ImportError};
pub use report::{ImportOutcome, ImportReport};
