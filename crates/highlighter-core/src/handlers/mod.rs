//! Built-in handlers, one per request kind.

mod auth;
mod calendar;
mod directions;
mod email;
mod panel;
mod summarize;
mod task;

use std::sync::Arc;

use highlighter_protocols::{AuthError, DispatchError};

pub use auth::{AuthenticateHandler, CheckAuthHandler};
pub use calendar::ListEventsHandler;
pub use directions::DirectionsHandler;
pub use email::EmailHandler;
pub use panel::OpenPanelHandler;
pub use summarize::SummarizeHandler;
pub use task::SaveTaskHandler;

use crate::auth::{AuthSession, SignInOutcome};
use crate::dispatcher::Dispatcher;
use crate::handler::HandlerError;
use crate::services::Services;

/// Register a handler for every request kind.
pub fn register_builtin_handlers(
    dispatcher: &Dispatcher,
    services: &Services,
) -> Result<(), DispatchError> {
    dispatcher.register_handler(Arc::new(SummarizeHandler::new(services.summarizer.clone())))?;
    dispatcher.register_handler(Arc::new(CheckAuthHandler::new(services.auth.clone())))?;
    dispatcher.register_handler(Arc::new(AuthenticateHandler::new(services.auth.clone())))?;
    dispatcher.register_handler(Arc::new(DirectionsHandler::new(services)))?;
    dispatcher.register_handler(Arc::new(EmailHandler::new(
        services.email.clone(),
        services.launcher.clone(),
    )))?;
    dispatcher.register_handler(Arc::new(SaveTaskHandler::new(
        services.tasks.clone(),
        services.auth.clone(),
    )))?;
    dispatcher.register_handler(Arc::new(OpenPanelHandler::new(services.launcher.clone())))?;
    dispatcher.register_handler(Arc::new(ListEventsHandler::new(
        services.calendar.clone(),
        services.auth.clone(),
    )))?;
    Ok(())
}

/// CheckAuth step, then an explicit Authenticate step when signed out.
async fn require_sign_in(auth: &AuthSession) -> Result<(), HandlerError> {
    if auth.check_auth().await? {
        return Ok(());
    }
    match auth.authenticate().await? {
        SignInOutcome::SignedIn => Ok(()),
        SignInOutcome::Denied(reason) => Err(AuthError::Denied(reason).into()),
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
