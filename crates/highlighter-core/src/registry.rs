//! Handler registry keyed by request kind.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use highlighter_protocols::{DispatchError, RequestKind};

use crate::handler::Handler;

/// Registry of one handler per request kind.
///
/// Registration is first-wins: a second handler for the same kind is
/// rejected and the original stays active.
pub struct HandlerRegistry {
    handlers: DashMap<RequestKind, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register a handler under its own kind.
    pub fn register(&self, handler: Arc<dyn Handler>) -> Result<(), DispatchError> {
        match self.handlers.entry(handler.kind()) {
            Entry::Occupied(entry) => Err(DispatchError::DuplicateHandler(*entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(handler);
                Ok(())
            }
        }
    }

    /// Get the handler for a kind.
    pub fn get(&self, kind: RequestKind) -> Option<Arc<dyn Handler>> {
        self.handlers.get(&kind).map(|h| h.clone())
    }

    pub fn contains(&self, kind: RequestKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<RequestKind> {
        let mut kinds: Vec<_> = self.handlers.iter().map(|e| *e.key()).collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
