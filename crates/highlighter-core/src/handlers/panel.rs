//! OpenPanel handler.

use std::sync::Arc;

use async_trait::async_trait;

use highlighter_protocols::{Reply, ReplyPayload, Request, RequestKind, SurfaceLauncher};

use crate::context::InvocationContext;
use crate::handler::{Handler, HandlerError, HandlerResult};

pub struct OpenPanelHandler {
    launcher: Arc<dyn SurfaceLauncher>,
}

impl OpenPanelHandler {
    pub fn new(launcher: Arc<dyn SurfaceLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl Handler for OpenPanelHandler {
    fn kind(&self) -> RequestKind {
        RequestKind::OpenPanel
    }

    async fn handle(&self, request: Request, ctx: &InvocationContext) -> HandlerResult {
        let requested_tab = match request {
            Request::OpenPanel { tab_id } => tab_id,
            other => return Err(HandlerError::wrong_kind(self.kind(), &other)),
        };
        let Some(tab_id) = requested_tab.or(ctx.tab_id) else {
            return Err(HandlerError::InvalidRequest("Missing tab ID".to_string()));
        };

        self.launcher.open_panel(tab_id).await?;
        Ok(Some(Reply::success(ReplyPayload::PanelOpened { tab_id })))
    }
}
