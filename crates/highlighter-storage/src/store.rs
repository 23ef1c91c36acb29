//! JSON-file key/value store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::history::{HistoryEntry, SummaryHistory};

/// Well-known keys.
pub mod keys {
    pub const LAST_SELECTION: &str = "lastSelection";
    pub const LAST_SUMMARY: &str = "lastSummary";
    pub const SUMMARY_HISTORY: &str = "summaryHistory";
}

const STORE_FILE: &str = "store.json";

/// Text the user highlighted most recently, kept until a surface consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSelection {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl LastSelection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Key/value store persisted as a single JSON object.
///
/// Every mutation rewrites the file through a temporary sibling and a
/// rename, so a crash never leaves a half-written store behind.
pub struct LocalStore {
    path: PathBuf,
    data: Mutex<Map<String, Value>>,
}

impl LocalStore {
    /// Open the store under `directory`, creating it lazily on first write.
    pub async fn open(directory: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = directory.as_ref().join(STORE_FILE);
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(json) => match serde_json::from_str::<Value>(&json)? {
                Value::Object(map) => map,
                other => {
                    return Err(StorageError::Corrupt {
                        path: path.display().to_string(),
                        message: format!("expected a JSON object, found {}", type_name(&other)),
                    });
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened store {:?} with {} keys", path, data.len());
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let data = self.data.lock().await;
        match data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        let mut data = self.data.lock().await;
        data.insert(key.to_string(), value);
        self.flush(&data).await
    }

    /// Remove `key`. Returns whether it was present.
    pub async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut data = self.data.lock().await;
        if data.remove(key).is_none() {
            return Ok(false);
        }
        self.flush(&data).await?;
        Ok(true)
    }

    /// Read and remove `key` in one step.
    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let mut data = self.data.lock().await;
        let Some(value) = data.remove(key) else {
            return Ok(None);
        };
        self.flush(&data).await?;
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Summary history, trimmed to `limit`.
    pub async fn history(&self, limit: usize) -> Result<SummaryHistory, StorageError> {
        let data = self.data.lock().await;
        Ok(history_from(&data, limit))
    }

    /// Record a summary: push it onto the history and cache it as the last summary.
    ///
    /// The whole update happens under one lock hold, so concurrent recordings
    /// all land in the history.
    pub async fn record_summary(
        &self,
        entry: HistoryEntry,
        limit: usize,
    ) -> Result<SummaryHistory, StorageError> {
        let entry_value = serde_json::to_value(&entry)?;
        let mut data = self.data.lock().await;

        let mut history = history_from(&data, limit);
        history.push(entry);
        data.insert(
            keys::SUMMARY_HISTORY.to_string(),
            serde_json::to_value(history.to_vec())?,
        );
        data.insert(keys::LAST_SUMMARY.to_string(), entry_value);
        self.flush(&data).await?;
        Ok(history)
    }

    pub async fn clear_history(&self) -> Result<(), StorageError> {
        let mut data = self.data.lock().await;
        let had_history = data.remove(keys::SUMMARY_HISTORY).is_some();
        let had_summary = data.remove(keys::LAST_SUMMARY).is_some();
        if had_history || had_summary {
            self.flush(&data).await?;
        }
        Ok(())
    }

    async fn flush(&self, data: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Stored history, or an empty one when the stored value is unreadable.
fn history_from(data: &Map<String, Value>, limit: usize) -> SummaryHistory {
    let entries = match data.get(keys::SUMMARY_HISTORY) {
        Some(value) => match serde_json::from_value::<Vec<HistoryEntry>>(value.clone()) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Discarding unreadable summary history: {}", e);
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    SummaryHistory::from_entries(entries, limit)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
