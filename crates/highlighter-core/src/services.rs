//! Adapter bundle handed to the built-in handlers.

use std::sync::Arc;

use highlighter_protocols::{
    CalendarService, DirectionsService, EmailComposer, IntentExtractor, Summarizer,
    SurfaceLauncher, TaskService,
};

use crate::auth::AuthSession;

/// External services used by the built-in handlers.
#[derive(Clone)]
pub struct Services {
    pub summarizer: Arc<dyn Summarizer>,
    pub intent: Arc<dyn IntentExtractor>,
    pub directions: Arc<dyn DirectionsService>,
    pub email: Arc<dyn EmailComposer>,
    pub tasks: Arc<dyn TaskService>,
    pub calendar: Arc<dyn CalendarService>,
    pub auth: Arc<AuthSession>,
    pub launcher: Arc<dyn SurfaceLauncher>,
}
