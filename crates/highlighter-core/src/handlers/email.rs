//! GenerateEmail handler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use highlighter_protocols::{EmailComposer, Reply, Request, RequestKind, SurfaceLauncher};

use crate::context::InvocationContext;
use crate::handler::{Handler, HandlerError, HandlerResult};

pub struct EmailHandler {
    composer: Arc<dyn EmailComposer>,
    launcher: Arc<dyn SurfaceLauncher>,
}

impl EmailHandler {
    pub fn new(composer: Arc<dyn EmailComposer>, launcher: Arc<dyn SurfaceLauncher>) -> Self {
        Self { composer, launcher }
    }
}

#[async_trait]
impl Handler for EmailHandler {
    fn kind(&self) -> RequestKind {
        RequestKind::GenerateEmail
    }

    async fn handle(&self, request: Request, _ctx: &InvocationContext) -> HandlerResult {
        let email_request = match request {
            Request::GenerateEmail(email_request) => email_request,
            other => return Err(HandlerError::wrong_kind(self.kind(), &other)),
        };

        let email = self.composer.compose(&email_request).await?;
        if let Err(e) = self.launcher.open_url(&email.compose_url).await {
            warn!("Could not open compose window: {}", e);
        }
        Ok(Some(Reply::success(email.into())))
    }
}
