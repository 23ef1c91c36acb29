//! # Highlighter Storage
//!
//! Local persistence for the surfaces: a JSON-file key/value store plus the
//! bounded summary history kept in it.

mod error;
mod history;
mod store;

pub use error::StorageError;
pub use history::{HistoryEntry, SummaryHistory, DEFAULT_HISTORY_LIMIT};
pub use store::{keys, LastSelection, LocalStore};
