//! Handler trait and handler-boundary errors.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use thiserror::Error;

use highlighter_protocols::{AdapterError, AuthError, ErrorCode, Reply, Request, RequestKind};

use crate::context::InvocationContext;

/// Outcome of a handler. `Ok(None)` means the handler produced no reply;
/// the dispatcher then answers with `HandlerProducedNoReply`.
pub type HandlerResult = Result<Option<Reply>, HandlerError>;

/// Failure that reached the handler boundary.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Handler for {expected} received a {actual} request")]
    WrongKind {
        expected: RequestKind,
        actual: RequestKind,
    },
}

impl HandlerError {
    pub fn wrong_kind(expected: RequestKind, request: &Request) -> Self {
        Self::WrongKind {
            expected,
            actual: request.kind(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Adapter(e) => e.code(),
            Self::Auth(e) => e.code(),
            Self::InvalidRequest(_) | Self::WrongKind { .. } => ErrorCode::InvalidRequest,
        }
    }

    /// Downgrade into a failed reply envelope.
    pub fn into_reply(self) -> Reply {
        Reply::failure(self.code(), self.to_string())
    }
}

/// Behavior for one request kind.
#[async_trait]
pub trait Handler: Send + Sync {
    /// The request kind this handler serves.
    fn kind(&self) -> RequestKind;

    /// Handle one request. May suspend on any number of adapter calls.
    async fn handle(&self, request: Request, ctx: &InvocationContext) -> HandlerResult;
}

/// Adapter turning an async closure into a [`Handler`].
pub struct FnHandler<F, Fut> {
    kind: RequestKind,
    func: F,
    _fut: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FnHandler<F, Fut>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    pub fn new(kind: RequestKind, func: F) -> Self {
        Self {
            kind,
            func,
            _fut: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F, Fut>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    fn kind(&self) -> RequestKind {
        self.kind
    }

    async fn handle(&self, request: Request, _ctx: &InvocationContext) -> HandlerResult {
        (self.func)(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_error_reply() {
        let reply = HandlerError::from(AdapterError::Unavailable("offline".to_string())).into_reply();
        assert!(!reply.ok);
        assert_eq!(reply.error, Some(ErrorCode::AdapterUnavailable));
        assert!(reply.message.as_deref().unwrap().contains("offline"));
        assert!(!reply.requires_auth());
    }

    #[test]
    fn test_adapter_auth_error_requires_auth() {
        let reply =
            HandlerError::from(AdapterError::AuthRequired("token expired".to_string())).into_reply();
        assert_eq!(reply.error, Some(ErrorCode::AuthRequired));
        assert!(reply.requires_auth());
    }

    #[test]
    fn test_auth_denied_reply() {
        let reply = HandlerError::from(AuthError::Denied("cancelled".to_string())).into_reply();
        assert_eq!(reply.error, Some(ErrorCode::AuthDenied));
        assert!(reply.requires_auth());
    }

    #[test]
    fn test_wrong_kind_display() {
        let err = HandlerError::WrongKind {
            expected: RequestKind::SaveTask,
            actual: RequestKind::CheckAuth,
        };
        assert!(err.to_string().contains("SaveTask"));
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn test_fn_handler() {
        let handler = FnHandler::new(RequestKind::CheckAuth, |_req| async {
            Ok(Some(Reply::ok()))
        });
        assert_eq!(handler.kind(), RequestKind::CheckAuth);
        let ctx = InvocationContext::new(crate::context::Surface::Cli);
        let reply = handler.handle(Request::CheckAuth, &ctx).await.unwrap();
        assert_eq!(reply, Some(Reply::ok()));
    }
}
