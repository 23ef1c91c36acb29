//! ListEvents handler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use highlighter_protocols::{
    CalendarService, EventQuery, Reply, ReplyPayload, Request, RequestKind, MAX_EVENT_COUNT,
};

use super::require_sign_in;
use crate::auth::AuthSession;
use crate::context::InvocationContext;
use crate::handler::{Handler, HandlerError, HandlerResult};

pub struct ListEventsHandler {
    calendar: Arc<dyn CalendarService>,
    auth: Arc<AuthSession>,
}

impl ListEventsHandler {
    pub fn new(calendar: Arc<dyn CalendarService>, auth: Arc<AuthSession>) -> Self {
        Self { calendar, auth }
    }
}

#[async_trait]
impl Handler for ListEventsHandler {
    fn kind(&self) -> RequestKind {
        RequestKind::ListEvents
    }

    async fn handle(&self, request: Request, _ctx: &InvocationContext) -> HandlerResult {
        let max_results = match request {
            Request::ListEvents { max_results } => max_results,
            other => return Err(HandlerError::wrong_kind(self.kind(), &other)),
        };
        if max_results == 0 {
            return Err(HandlerError::InvalidRequest(
                "maxResults must be at least 1".to_string(),
            ));
        }

        require_sign_in(&self.auth).await?;
        let token = self.auth.token().await?;

        let query = EventQuery {
            time_min: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            max_results: max_results.min(MAX_EVENT_COUNT),
        };
        let events = self.calendar.upcoming_events(&token, &query).await?;
        debug!("Listed {} upcoming events", events.len());
        Ok(Some(Reply::success(ReplyPayload::Events { events })))
    }
}
