//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use highlighter_core::{InvocationContext, Surface};
use highlighter_protocols::{Envelope, ErrorCode, Reply, ReplyPayload, Request};
use highlighter_storage::{keys, HistoryEntry, LastSelection, LocalStore};

use crate::HttpChannelState;

/// Header carrying the browser tab of the calling surface.
pub const TAB_ID_HEADER: &str = "x-tab-id";

/// Create the router.
///
/// ```text
/// POST   /api/dispatch   - dispatch one request envelope, returns its reply
/// POST   /api/selection  - remember the latest highlighted text
/// GET    /api/selection  - take (and clear) the remembered selection
/// GET    /api/history    - summary history, most recent first
/// DELETE /api/history    - clear summary history
/// GET    /api/info       - service info
/// GET    /health         - health and in-flight count
/// ```
pub fn create_router(state: Arc<HttpChannelState>) -> Router {
    Router::new()
        .route("/api/dispatch", post(dispatch))
        .route("/api/selection", post(save_selection).get(take_selection))
        .route("/api/history", get(list_history).delete(clear_history))
        .route("/api/info", get(api_info))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn tab_id(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TAB_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Dispatch endpoint. The HTTP status is 200 whenever a reply was produced;
/// success or failure is carried by the reply itself.
async fn dispatch(
    State(state): State<Arc<HttpChannelState>>,
    headers: HeaderMap,
    body: Result<Json<Envelope>, JsonRejection>,
) -> Response {
    let Json(envelope) = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!("Rejected dispatch body: {}", rejection);
            let reply = Reply::failure(ErrorCode::InvalidRequest, rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };

    let mut ctx = InvocationContext::new(Surface::Http);
    if let Some(tab) = tab_id(&headers) {
        ctx = ctx.with_tab(tab);
    }

    let request = match Request::from_envelope(envelope) {
        Ok(request) => request,
        Err(e) => return Json(Reply::failure(e.code(), e.to_string())).into_response(),
    };
    let summarized_text = match &request {
        Request::SummarizeText { text } => Some(text.clone()),
        _ => None,
    };

    let reply = state.dispatcher.dispatch(request, ctx).await;

    if let (Some(store), Some(text), Some(ReplyPayload::Summary { summary })) =
        (&state.store, summarized_text, &reply.payload)
    {
        if let Err(e) = store
            .record_summary(HistoryEntry::new(text, summary.clone()), state.history_limit)
            .await
        {
            warn!("Could not record summary history: {}", e);
        }
    }

    Json(reply).into_response()
}

#[derive(Debug, Deserialize)]
struct SelectionBody {
    text: String,
}

fn storage_disabled() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"ok": false, "message": "Local storage is disabled"})),
    )
        .into_response()
}

fn storage_error(e: impl std::fmt::Display) -> Response {
    warn!("Storage error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"ok": false, "message": e.to_string()})),
    )
        .into_response()
}

fn store(state: &HttpChannelState) -> Option<&LocalStore> {
    state.store.as_deref()
}

async fn save_selection(
    State(state): State<Arc<HttpChannelState>>,
    Json(body): Json<SelectionBody>,
) -> Response {
    let Some(store) = store(&state) else {
        return storage_disabled();
    };
    match store
        .set(keys::LAST_SELECTION, &LastSelection::new(body.text))
        .await
    {
        Ok(()) => Json(serde_json::json!({"ok": true})).into_response(),
        Err(e) => storage_error(e),
    }
}

async fn take_selection(State(state): State<Arc<HttpChannelState>>) -> Response {
    let Some(store) = store(&state) else {
        return storage_disabled();
    };
    match store.take::<LastSelection>(keys::LAST_SELECTION).await {
        Ok(selection) => Json(serde_json::json!({"ok": true, "selection": selection})).into_response(),
        Err(e) => storage_error(e),
    }
}

async fn list_history(State(state): State<Arc<HttpChannelState>>) -> Response {
    let Some(store) = store(&state) else {
        return storage_disabled();
    };
    match store.history(state.history_limit).await {
        Ok(history) => {
            Json(serde_json::json!({"ok": true, "items": history.to_vec()})).into_response()
        }
        Err(e) => storage_error(e),
    }
}

async fn clear_history(State(state): State<Arc<HttpChannelState>>) -> Response {
    let Some(store) = store(&state) else {
        return storage_disabled();
    };
    match store.clear_history().await {
        Ok(()) => Json(serde_json::json!({"ok": true})).into_response(),
        Err(e) => storage_error(e),
    }
}

async fn health_check(State(state): State<Arc<HttpChannelState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "in_flight": state.dispatcher.in_flight(),
        "uptime_seconds": (chrono::Utc::now() - state.started_at).num_seconds(),
    }))
}

async fn api_info(State(state): State<Arc<HttpChannelState>>) -> impl IntoResponse {
    let kinds: Vec<&str> = state
        .dispatcher
        .kinds()
        .into_iter()
        .map(|k| k.as_str())
        .collect();
    Json(serde_json::json!({
        "name": "Highlighter",
        "version": env!("CARGO_PKG_VERSION"),
        "request_kinds": kinds,
        "storage": state.store.is_some(),
        "endpoints": {
            "dispatch": "/api/dispatch",
            "selection": "/api/selection",
            "history": "/api/history",
            "health": "/health",
            "info": "/api/info"
        }
    }))
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
