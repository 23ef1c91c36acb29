//! Identity provider errors.

use thiserror::Error;

use super::{AdapterError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The user cancelled or refused the sign-in prompt.
    #[error("Sign-in was denied: {0}")]
    Denied(String),

    /// No usable token is available without prompting.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Identity provider error: {0}")]
    Provider(#[from] AdapterError),
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Denied(_) => ErrorCode::AuthDenied,
            Self::NotAuthenticated => ErrorCode::AuthRequired,
            Self::Provider(err) => err.code(),
        }
    }
}
