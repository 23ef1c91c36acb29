//! Dispatcher-level errors.

use thiserror::Error;

use super::ErrorCode;
use crate::request::RequestKind;

/// Structural errors raised by the dispatcher itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Unknown request kind: {0}")]
    UnknownKind(String),

    #[error("Handler already registered for {0}")]
    DuplicateHandler(RequestKind),

    #[error("Invalid payload for {kind}: {message}")]
    InvalidPayload { kind: RequestKind, message: String },
}

impl DispatchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownKind(_) => ErrorCode::UnknownRequestKind,
            Self::DuplicateHandler(_) => ErrorCode::DuplicateHandlerRegistration,
            Self::InvalidPayload { .. } => ErrorCode::InvalidRequest,
        }
    }
}
