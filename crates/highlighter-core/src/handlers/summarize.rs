//! SummarizeText handler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use highlighter_protocols::{Reply, ReplyPayload, Request, RequestKind, Summarizer};

use crate::context::InvocationContext;
use crate::handler::{Handler, HandlerError, HandlerResult};

pub struct SummarizeHandler {
    summarizer: Arc<dyn Summarizer>,
}

impl SummarizeHandler {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }
}

#[async_trait]
impl Handler for SummarizeHandler {
    fn kind(&self) -> RequestKind {
        RequestKind::SummarizeText
    }

    async fn handle(&self, request: Request, _ctx: &InvocationContext) -> HandlerResult {
        let text = match request {
            Request::SummarizeText { text } => text,
            other => return Err(HandlerError::wrong_kind(self.kind(), &other)),
        };

        debug!("Summarizing {} chars with {}", text.len(), self.summarizer.name());
        let summary = self.summarizer.summarize(&text).await?;
        Ok(Some(Reply::success(ReplyPayload::Summary { summary })))
    }
}
