//! External service adapter errors.

use thiserror::Error;

use super::ErrorCode;

/// Failure of a single adapter call.
///
/// Adapters never retry; the handler decides what to do with the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl AdapterError {
    /// Classify a non-success HTTP status returned by an external API.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = format!("HTTP {}: {}", status, message.into());
        match status {
            401 | 403 => Self::AuthRequired(message),
            400 | 404 | 422 => Self::InvalidInput(message),
            408 | 429 | 500..=599 => Self::Unavailable(message),
            _ => Self::Transport(message),
        }
    }

    /// Wire code for a reply carrying this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidRequest,
            Self::Unavailable(_) => ErrorCode::AdapterUnavailable,
            Self::AuthRequired(_) => ErrorCode::AuthRequired,
            Self::InvalidResponse(_) => ErrorCode::AdapterInvalidResponse,
            Self::Transport(_) => ErrorCode::TransportError,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::AuthRequired(_))
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
