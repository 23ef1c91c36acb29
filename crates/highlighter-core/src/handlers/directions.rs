//! GetDirections handler.
//!
//! Steps, in order: CheckAuth, Authenticate (only when signed out),
//! ExtractDestination, OpenDirections. Extraction never fails the request:
//! an error, a missing destination or a low/none confidence result falls
//! back to the raw selection with `low` confidence.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use highlighter_protocols::{
    Confidence, DirectionsQuery, DirectionsService, Intent, IntentExtractor, Reply,
    ReplyPayload, Request, RequestKind, SurfaceLauncher,
};

use super::require_sign_in;
use crate::auth::AuthSession;
use crate::context::InvocationContext;
use crate::handler::{Handler, HandlerError, HandlerResult};
use crate::services::Services;

pub struct DirectionsHandler {
    auth: Arc<AuthSession>,
    intent: Arc<dyn IntentExtractor>,
    directions: Arc<dyn DirectionsService>,
    launcher: Arc<dyn SurfaceLauncher>,
}

impl DirectionsHandler {
    pub fn new(services: &Services) -> Self {
        Self {
            auth: services.auth.clone(),
            intent: services.intent.clone(),
            directions: services.directions.clone(),
            launcher: services.launcher.clone(),
        }
    }

    async fn extract(&self, text: &str) -> Intent {
        match self.intent.extract_destination(text).await {
            Ok(intent) if accepts(&intent) => intent,
            Ok(intent) => {
                warn!(
                    "Low-confidence destination ({}), using selection as-is",
                    intent.confidence
                );
                Intent::fallback(text, format!("Using original text as fallback: {}", intent.reason))
            }
            Err(e) => {
                warn!("Destination extraction failed, using selection as-is: {}", e);
                Intent::fallback(text, format!("Using original text as fallback: {}", e))
            }
        }
    }
}

fn accepts(intent: &Intent) -> bool {
    intent.usable_destination().is_some()
        && matches!(intent.confidence, Confidence::High | Confidence::Medium)
}

#[async_trait]
impl Handler for DirectionsHandler {
    fn kind(&self) -> RequestKind {
        RequestKind::GetDirections
    }

    async fn handle(&self, request: Request, ctx: &InvocationContext) -> HandlerResult {
        let text = match request {
            Request::GetDirections { text } => text,
            other => return Err(HandlerError::wrong_kind(self.kind(), &other)),
        };

        require_sign_in(&self.auth).await.inspect_err(|e| {
            info!("Directions cancelled before extraction: {}", e);
        })?;
        ctx.set("step", "extract");

        let intent = self.extract(&text).await;
        let Some(destination) = intent.usable_destination().map(str::to_string) else {
            return Err(HandlerError::InvalidRequest(
                "Could not determine a destination from the selected text".to_string(),
            ));
        };
        debug!(
            "Destination '{}' ({}): {}",
            destination, intent.confidence, intent.reason
        );
        ctx.set("step", "directions");

        let directions = self
            .directions
            .directions(&DirectionsQuery {
                origin: None,
                destination: destination.clone(),
            })
            .await?;

        if let Err(e) = self.launcher.open_url(&directions.url).await {
            warn!("Could not open directions: {}", e);
        }

        Ok(Some(Reply::success(ReplyPayload::Directions {
            url: directions.url,
            destination,
            confidence: intent.confidence,
            reason: intent.reason,
            route: directions.route,
        })))
    }
}
