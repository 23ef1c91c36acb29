//! Scripted adapters for handler and dispatcher tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use highlighter_protocols::{
    AccessToken, AdapterError, AuthError, CalendarEvent, CalendarService, ComposedEmail,
    CreatedTask, Directions, DirectionsQuery, DirectionsService, EmailComposer, EmailRequest,
    EventQuery, IdentityProvider, Intent, IntentExtractor, Summarizer, SurfaceLauncher, TaskDraft,
    TaskService, UserInfo,
};

use crate::auth::AuthSession;
use crate::services::Services;

/// Ordered record of adapter calls shared by all fakes of one test.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.0.lock().iter().any(|e| e.starts_with(prefix))
    }

    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.0.lock().iter().position(|e| e.starts_with(prefix))
    }
}

pub struct FakeSummarizer {
    pub log: CallLog,
    pub delay: Option<Duration>,
    pub fail: Option<AdapterError>,
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    fn name(&self) -> &str {
        "fake-summarizer"
    }

    async fn summarize(&self, text: &str) -> Result<String, AdapterError> {
        self.log.push(format!("summarize:{}", text));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        if text.trim().is_empty() {
            return Err(AdapterError::InvalidInput("text is empty".to_string()));
        }
        Ok(format!("summary of {}", text))
    }
}

pub struct FakeIntent {
    pub log: CallLog,
    pub delay: Option<Duration>,
    pub result: Result<Intent, AdapterError>,
}

#[async_trait]
impl IntentExtractor for FakeIntent {
    fn name(&self) -> &str {
        "fake-intent"
    }

    async fn extract_destination(&self, text: &str) -> Result<Intent, AdapterError> {
        self.log.push(format!("extract:{}", text));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

pub struct FakeDirections {
    pub log: CallLog,
}

#[async_trait]
impl DirectionsService for FakeDirections {
    fn name(&self) -> &str {
        "fake-directions"
    }

    async fn directions(&self, query: &DirectionsQuery) -> Result<Directions, AdapterError> {
        self.log.push(format!("directions:{}", query.destination));
        Ok(Directions {
            url: format!("https://maps.test/dir?destination={}", query.destination),
            route: None,
        })
    }
}

pub struct FakeEmail {
    pub log: CallLog,
}

#[async_trait]
impl EmailComposer for FakeEmail {
    fn name(&self) -> &str {
        "fake-email"
    }

    async fn compose(&self, request: &EmailRequest) -> Result<ComposedEmail, AdapterError> {
        self.log.push(format!("compose:{}", request.purpose));
        Ok(ComposedEmail {
            subject: "Re: your note".to_string(),
            body: format!("About {}", request.selected_text),
            compose_url: "https://mail.test/compose".to_string(),
        })
    }
}

pub struct FakeTasks {
    pub log: CallLog,
    pub fail: Option<AdapterError>,
}

#[async_trait]
impl TaskService for FakeTasks {
    fn name(&self) -> &str {
        "fake-tasks"
    }

    async fn create_task(
        &self,
        token: &AccessToken,
        draft: &TaskDraft,
    ) -> Result<CreatedTask, AdapterError> {
        self.log
            .push(format!("create_task:{}:{}", draft.title, token.secret()));
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        Ok(CreatedTask {
            id: "task-1".to_string(),
            list_id: draft.list_hint.clone().unwrap_or_else(|| "default".to_string()),
        })
    }
}

pub struct FakeCalendar {
    pub log: CallLog,
    pub fail: Option<AdapterError>,
}

#[async_trait]
impl CalendarService for FakeCalendar {
    fn name(&self) -> &str {
        "fake-calendar"
    }

    async fn upcoming_events(
        &self,
        token: &AccessToken,
        query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>, AdapterError> {
        self.log
            .push(format!("list_events:{}:{}", query.max_results, token.secret()));
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        Ok(vec![CalendarEvent {
            id: "evt-1".to_string(),
            summary: "Standup".to_string(),
            start: "2026-10-16T09:00:00Z".to_string(),
            end: None,
            html_link: None,
        }])
    }
}

pub struct FakeLauncher {
    pub log: CallLog,
    pub fail: bool,
}

#[async_trait]
impl SurfaceLauncher for FakeLauncher {
    async fn open_url(&self, url: &str) -> Result<(), AdapterError> {
        self.log.push(format!("open_url:{}", url));
        if self.fail {
            return Err(AdapterError::Unavailable("no browser".to_string()));
        }
        Ok(())
    }

    async fn open_panel(&self, tab_id: u64) -> Result<(), AdapterError> {
        self.log.push(format!("open_panel:{}", tab_id));
        Ok(())
    }
}

pub struct FakeIdentity {
    pub log: CallLog,
    /// Token returned by non-interactive lookups. Interactive sign-in fills it.
    pub silent: Mutex<Option<AccessToken>>,
    /// Outcome of interactive sign-in.
    pub interactive: Result<AccessToken, AuthError>,
}

impl FakeIdentity {
    pub fn signed_out(log: CallLog) -> Self {
        Self {
            log,
            silent: Mutex::new(None),
            interactive: Ok(AccessToken::new("fresh-token")),
        }
    }

    pub fn denying(log: CallLog) -> Self {
        Self {
            log,
            silent: Mutex::new(None),
            interactive: Err(AuthError::Denied("user cancelled".to_string())),
        }
    }

    pub fn signed_in(log: CallLog) -> Self {
        Self {
            log,
            silent: Mutex::new(Some(AccessToken::new("cached-token"))),
            interactive: Ok(AccessToken::new("fresh-token")),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn name(&self) -> &str {
        "fake-identity"
    }

    async fn get_token(&self, interactive: bool) -> Result<AccessToken, AuthError> {
        if interactive {
            self.log.push("authenticate");
            let outcome = self.interactive.clone();
            if let Ok(token) = &outcome {
                *self.silent.lock() = Some(token.clone());
            }
            return outcome;
        }
        self.log.push("check_auth");
        self.silent.lock().clone().ok_or(AuthError::NotAuthenticated)
    }

    async fn get_user_info(&self, _token: &AccessToken) -> Result<UserInfo, AuthError> {
        self.log.push("user_info");
        Ok(UserInfo {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            picture: String::new(),
        })
    }

    async fn invalidate(&self, _token: &AccessToken) -> Result<(), AuthError> {
        self.log.push("invalidate");
        *self.silent.lock() = None;
        Ok(())
    }
}

/// Services wired to fakes with default behavior.
pub struct FakeServices {
    pub log: CallLog,
    pub summarizer: FakeSummarizer,
    pub intent: FakeIntent,
    pub identity: FakeIdentity,
    pub tasks: FakeTasks,
    pub calendar: FakeCalendar,
    pub launcher_fails: bool,
}

impl FakeServices {
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            summarizer: FakeSummarizer {
                log: log.clone(),
                delay: None,
                fail: None,
            },
            intent: FakeIntent {
                log: log.clone(),
                delay: None,
                result: Ok(Intent {
                    destination: Some("Paris".to_string()),
                    confidence: highlighter_protocols::Confidence::High,
                    reason: "explicit".to_string(),
                }),
            },
            identity: FakeIdentity::signed_in(log.clone()),
            tasks: FakeTasks {
                log: log.clone(),
                fail: None,
            },
            calendar: FakeCalendar {
                log: log.clone(),
                fail: None,
            },
            launcher_fails: false,
            log,
        }
    }

    pub fn build(self) -> Services {
        let log = self.log;
        Services {
            summarizer: Arc::new(self.summarizer),
            intent: Arc::new(self.intent),
            directions: Arc::new(FakeDirections { log: log.clone() }),
            email: Arc::new(FakeEmail { log: log.clone() }),
            tasks: Arc::new(self.tasks),
            calendar: Arc::new(self.calendar),
            auth: Arc::new(AuthSession::new(Arc::new(self.identity))),
            launcher: Arc::new(FakeLauncher {
                log,
                fail: self.launcher_fails,
            }),
        }
    }
}
