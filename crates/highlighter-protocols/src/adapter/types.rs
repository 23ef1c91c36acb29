//! Adapter input and output types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque OAuth access token.
///
/// The token is owned by the identity provider; the dispatcher only holds
/// it between `authenticate` and `invalidate`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw bearer value, for building `Authorization` headers.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Profile of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub picture: String,
}

/// Coarse confidence reported by the intent extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[serde(alias = "High", alias = "HIGH")]
    High,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "Low", alias = "LOW")]
    Low,
    #[serde(alias = "None", alias = "NONE")]
    None,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_confidence() -> Confidence {
    Confidence::Low
}

/// Structured destination extracted from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default = "default_confidence")]
    pub confidence: Confidence,
    #[serde(default)]
    pub reason: String,
}

impl Intent {
    /// Degraded result that treats the raw selection as the destination.
    pub fn fallback(text: &str, reason: impl Into<String>) -> Self {
        Self {
            destination: Some(text.trim().to_string()),
            confidence: Confidence::Low,
            reason: reason.into(),
        }
    }

    /// A destination is usable when present, non-blank and not `none`.
    pub fn usable_destination(&self) -> Option<&str> {
        if self.confidence == Confidence::None {
            return None;
        }
        self.destination
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Input to the directions adapter. `None` origin means the user's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsQuery {
    pub origin: Option<String>,
    pub destination: String,
}

/// Directions result: always a map URL, plus the provider's route payload
/// when a routing API key is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<serde_json::Value>,
}

/// A task to be saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// RFC 3339 due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Name of the task list to file into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTask {
    pub id: String,
    pub list_id: String,
}

fn default_purpose() -> String {
    "reply to this message".to_string()
}

fn default_tone() -> String {
    "formal".to_string()
}

/// Input to the email composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub selected_text: String,
    #[serde(default = "default_purpose")]
    pub purpose: String,
    #[serde(default = "default_tone")]
    pub tone: String,
}

/// Composed message descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedEmail {
    pub subject: String,
    pub body: String,
    pub compose_url: String,
}

/// Number of upcoming events listed when the request does not say.
pub const DEFAULT_EVENT_COUNT: u32 = 10;

/// Upper bound on events listed per request.
pub const MAX_EVENT_COUNT: u32 = 250;

/// Query for upcoming events on the primary calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    /// RFC 3339 lower bound on event end times, normally "now".
    pub time_min: String,
    pub max_results: u32,
}

/// One calendar event. `start`/`end` hold a date-time, or a date for
/// all-day events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
