//! Wire-level error codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error code carried in the `error` field of a failed reply.
///
/// Serializes to the variant name, e.g. `"UnknownRequestKind"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    UnknownRequestKind,
    DuplicateHandlerRegistration,
    InvalidRequest,
    AdapterUnavailable,
    AdapterInvalidResponse,
    AuthRequired,
    AuthDenied,
    TransportError,
    HandlerProducedNoReply,
    HandlerFailed,
}

impl ErrorCode {
    /// Returns the wire name of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownRequestKind => "UnknownRequestKind",
            Self::DuplicateHandlerRegistration => "DuplicateHandlerRegistration",
            Self::InvalidRequest => "InvalidRequest",
            Self::AdapterUnavailable => "AdapterUnavailable",
            Self::AdapterInvalidResponse => "AdapterInvalidResponse",
            Self::AuthRequired => "AuthRequired",
            Self::AuthDenied => "AuthDenied",
            Self::TransportError => "TransportError",
            Self::HandlerProducedNoReply => "HandlerProducedNoReply",
            Self::HandlerFailed => "HandlerFailed",
        }
    }

    /// Whether a reply with this code should prompt the user to sign in.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::AuthDenied)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
