//! # Highlighter Core
//!
//! The request-routing core: a registry of request kind to handler and a
//! dispatcher that guarantees exactly one reply per request.
//!
//! ## Components
//!
//! - [`Dispatcher`] - routes requests to handlers, one task per invocation
//! - [`HandlerRegistry`] - kind-keyed registry with fail-fast duplicates
//! - [`PendingInvocation`] / [`PendingReply`] - the two ends of a reply channel
//! - [`InvocationContext`] - per-request context threaded through handlers
//! - [`AuthSession`] - cached-token state machine over an identity provider
//! - [`handlers`] - the built-in handlers for every request kind

pub mod auth;
pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod invocation;
pub mod registry;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthSession, AuthState, SignInOutcome};
pub use context::{InvocationContext, Surface};
pub use dispatcher::Dispatcher;
pub use handler::{FnHandler, Handler, HandlerError, HandlerResult};
pub use handlers::register_builtin_handlers;
pub use invocation::{PendingInvocation, PendingReply};
pub use registry::HandlerRegistry;
pub use services::Services;
