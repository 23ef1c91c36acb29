//! # Highlighter Channel - HTTP
//!
//! HTTP surface for the dispatcher. Browser surfaces (popup, side panel,
//! overlay) post request envelopes and receive exactly one reply each.
//!
//! ## Usage
//!
//! ```ignore
//! use highlighter_channel_http::{HttpChannel, HttpChannelState};
//!
//! let state = HttpChannelState::new(dispatcher).with_store(store, 10);
//! HttpChannel::new("127.0.0.1", 8080).serve(state, shutdown).await?;
//! ```

mod server;

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use highlighter_core::Dispatcher;
use highlighter_storage::LocalStore;

pub use server::{create_router, TAB_ID_HEADER};

/// State shared by all routes.
pub struct HttpChannelState {
    pub dispatcher: Arc<Dispatcher>,
    /// Local store for selections and summary history, when enabled.
    pub store: Option<Arc<LocalStore>>,
    pub history_limit: usize,
    pub started_at: DateTime<Utc>,
}

impl HttpChannelState {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            store: None,
            history_limit: highlighter_storage::DEFAULT_HISTORY_LIMIT,
            started_at: Utc::now(),
        }
    }

    pub fn with_store(mut self, store: Arc<LocalStore>, history_limit: usize) -> Self {
        self.store = Some(store);
        self.history_limit = history_limit;
        self
    }
}

/// HTTP listener for the dispatcher.
pub struct HttpChannel {
    host: String,
    port: u16,
}

impl HttpChannel {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve<F>(self, state: HttpChannelState, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(self.address()).await?;
        info!("HTTP surface listening on http://{}", listener.local_addr()?);

        let router = create_router(Arc::new(state));
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("HTTP surface stopped");
        Ok(())
    }
}
