//! Adapter trait definitions.

use async_trait::async_trait;

use super::{
    AccessToken, CalendarEvent, ComposedEmail, CreatedTask, Directions, DirectionsQuery,
    EmailRequest, EventQuery, Intent, TaskDraft, UserInfo,
};
use crate::error::{AdapterError, AuthError};

/// Summarizes a text selection.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Returns the adapter name used in logs.
    fn name(&self) -> &str;

    async fn summarize(&self, text: &str) -> Result<String, AdapterError>;
}

/// Extracts the most likely destination from a text selection.
///
/// Implementations backed by a language model should run the raw output
/// through [`parse_intent_output`](super::parse_intent_output).
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    fn name(&self) -> &str;

    async fn extract_destination(&self, text: &str) -> Result<Intent, AdapterError>;
}

/// Builds driving directions for a destination.
#[async_trait]
pub trait DirectionsService: Send + Sync {
    fn name(&self) -> &str;

    async fn directions(&self, query: &DirectionsQuery) -> Result<Directions, AdapterError>;
}

/// Drafts an email from a selection.
#[async_trait]
pub trait EmailComposer: Send + Sync {
    fn name(&self) -> &str;

    async fn compose(&self, request: &EmailRequest) -> Result<ComposedEmail, AdapterError>;
}

/// Creates tasks in the user's task service.
#[async_trait]
pub trait TaskService: Send + Sync {
    fn name(&self) -> &str;

    async fn create_task(
        &self,
        token: &AccessToken,
        draft: &TaskDraft,
    ) -> Result<CreatedTask, AdapterError>;
}

/// Reads the user's calendar.
#[async_trait]
pub trait CalendarService: Send + Sync {
    fn name(&self) -> &str;

    /// Upcoming events on the primary calendar, soonest first.
    async fn upcoming_events(
        &self,
        token: &AccessToken,
        query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>, AdapterError>;
}

/// OAuth identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Acquire a token. With `interactive == false` this must never prompt
    /// the user and fails with [`AuthError::NotAuthenticated`] instead.
    async fn get_token(&self, interactive: bool) -> Result<AccessToken, AuthError>;

    async fn get_user_info(&self, token: &AccessToken) -> Result<UserInfo, AuthError>;

    /// Forget a cached token.
    async fn invalidate(&self, token: &AccessToken) -> Result<(), AuthError>;
}

/// Opens URLs and panels on behalf of the originating surface.
#[async_trait]
pub trait SurfaceLauncher: Send + Sync {
    async fn open_url(&self, url: &str) -> Result<(), AdapterError>;

    async fn open_panel(&self, tab_id: u64) -> Result<(), AdapterError>;
}
