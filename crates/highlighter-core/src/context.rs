//! Per-invocation context passed to handlers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// UI surface that originated a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Popup,
    SidePanel,
    Overlay,
    Http,
    Cli,
}

/// Context for a single request.
///
/// Each invocation owns its context; scratch state set by one handler chain
/// is never visible to another. The type is deliberately not `Clone`.
#[derive(Debug)]
pub struct InvocationContext {
    /// Unique ID of this invocation, used as the tracing correlation ID.
    pub invocation_id: String,

    /// Surface the request came from.
    pub surface: Surface,

    /// Browser tab of the originating surface, when known.
    pub tab_id: Option<u64>,

    /// When the dispatcher accepted the request.
    pub received_at: DateTime<Utc>,

    data: RwLock<HashMap<String, serde_json::Value>>,
}

impl InvocationContext {
    pub fn new(surface: Surface) -> Self {
        Self {
            invocation_id: uuid::Uuid::new_v4().to_string(),
            surface,
            tab_id: None,
            received_at: Utc::now(),
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_tab(mut self, tab_id: u64) -> Self {
        self.tab_id = Some(tab_id);
        self
    }

    /// Milliseconds since the request was accepted.
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.received_at).num_milliseconds()
    }

    /// Get a scratch value.
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = self.data.read();
        data.get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a scratch value.
    pub fn set<T: serde::Serialize>(&self, key: impl Into<String>, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.data.write().insert(key.into(), v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new() {
        let ctx = InvocationContext::new(Surface::Popup);
        assert_eq!(ctx.surface, Surface::Popup);
        assert!(ctx.tab_id.is_none());
        assert!(!ctx.invocation_id.is_empty());
    }

    #[test]
    fn test_context_ids_are_unique() {
        let a = InvocationContext::new(Surface::Overlay);
        let b = InvocationContext::new(Surface::Overlay);
        assert_ne!(a.invocation_id, b.invocation_id);
    }

    #[test]
    fn test_context_with_tab() {
        let ctx = InvocationContext::new(Surface::SidePanel).with_tab(7);
        assert_eq!(ctx.tab_id, Some(7));
    }

    #[test]
    fn test_context_get_set() {
        let ctx = InvocationContext::new(Surface::Cli);
        ctx.set("step", "extract");
        let result: Option<String> = ctx.get("step");
        assert_eq!(result, Some("extract".to_string()));
    }

    #[test]
    fn test_context_get_missing() {
        let ctx = InvocationContext::new(Surface::Cli);
        let result: Option<String> = ctx.get("missing");
        assert!(result.is_none());
    }

    #[test]
    fn test_context_data_is_not_shared() {
        let a = InvocationContext::new(Surface::Popup);
        let b = InvocationContext::new(Surface::Popup);
        a.set("summarizing", true);
        assert_eq!(a.get::<bool>("summarizing"), Some(true));
        assert!(b.get::<bool>("summarizing").is_none());
    }

    #[test]
    fn test_surface_serialization() {
        let json = serde_json::to_value(Surface::SidePanel).unwrap();
        assert_eq!(json, "side_panel");
    }
}
