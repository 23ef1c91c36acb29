//! Bounded, most-recent-first summary history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One summarized selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(alias = "originalText", alias = "text")]
    pub original_text: String,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(original_text: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            summary: summary.into(),
            timestamp: Utc::now(),
        }
    }
}

/// History capped at `limit` entries; the oldest entry is evicted first.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryHistory {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl SummaryHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: limit.max(1),
        }
    }

    /// Rebuild from stored entries (most recent first), trimming to `limit`.
    pub fn from_entries(entries: Vec<HistoryEntry>, limit: usize) -> Self {
        let mut history = Self::new(limit);
        history.entries = entries.into_iter().take(history.limit).collect();
        history
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for SummaryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
