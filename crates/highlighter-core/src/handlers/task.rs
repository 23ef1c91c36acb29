//! SaveTask handler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use highlighter_protocols::{Reply, Request, RequestKind, TaskService};

use super::require_sign_in;
use crate::auth::AuthSession;
use crate::context::InvocationContext;
use crate::handler::{Handler, HandlerError, HandlerResult};

pub struct SaveTaskHandler {
    tasks: Arc<dyn TaskService>,
    auth: Arc<AuthSession>,
}

impl SaveTaskHandler {
    pub fn new(tasks: Arc<dyn TaskService>, auth: Arc<AuthSession>) -> Self {
        Self { tasks, auth }
    }
}

#[async_trait]
impl Handler for SaveTaskHandler {
    fn kind(&self) -> RequestKind {
        RequestKind::SaveTask
    }

    async fn handle(&self, request: Request, _ctx: &InvocationContext) -> HandlerResult {
        let draft = match request {
            Request::SaveTask(draft) => draft,
            other => return Err(HandlerError::wrong_kind(self.kind(), &other)),
        };
        if draft.title.trim().is_empty() {
            return Err(HandlerError::InvalidRequest("Task title is empty".to_string()));
        }

        require_sign_in(&self.auth).await?;
        let token = self.auth.token().await?;

        let created = self.tasks.create_task(&token, &draft).await?;
        info!("Saved task {} in list {}", created.id, created.list_id);
        Ok(Some(Reply::success(created.into())))
    }
}
