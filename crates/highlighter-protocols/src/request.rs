//! Requests sent by UI surfaces.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::adapter::{EmailRequest, TaskDraft, DEFAULT_EVENT_COUNT};
use crate::error::DispatchError;

/// Kind of a request; the dispatcher's routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequestKind {
    SummarizeText,
    CheckAuth,
    Authenticate,
    GetDirections,
    GenerateEmail,
    SaveTask,
    OpenPanel,
    ListEvents,
}

impl RequestKind {
    pub const ALL: [RequestKind; 8] = [
        Self::SummarizeText,
        Self::CheckAuth,
        Self::Authenticate,
        Self::GetDirections,
        Self::GenerateEmail,
        Self::SaveTask,
        Self::OpenPanel,
        Self::ListEvents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SummarizeText => "SummarizeText",
            Self::CheckAuth => "CheckAuth",
            Self::Authenticate => "Authenticate",
            Self::GetDirections => "GetDirections",
            Self::GenerateEmail => "GenerateEmail",
            Self::SaveTask => "SaveTask",
            Self::OpenPanel => "OpenPanel",
            Self::ListEvents => "ListEvents",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestKind {
    type Err = DispatchError;

    /// Accepts the canonical names and the legacy extension message types.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SummarizeText" | "TEXT_SELECTED" => Ok(Self::SummarizeText),
            "CheckAuth" | "CHECK_AUTH" => Ok(Self::CheckAuth),
            "Authenticate" | "AUTHENTICATE" => Ok(Self::Authenticate),
            "GetDirections" | "GET_DIRECTIONS" => Ok(Self::GetDirections),
            "GenerateEmail" | "GENERATE_EMAIL" => Ok(Self::GenerateEmail),
            "SaveTask" | "SAVE_TASK" => Ok(Self::SaveTask),
            "OpenPanel" | "OPEN_SUMMARY_SIDEPANEL" | "OPEN_SUMMARY_POPUP" => Ok(Self::OpenPanel),
            "ListEvents" | "get_events" | "GET_EVENTS" => Ok(Self::ListEvents),
            other => Err(DispatchError::UnknownKind(other.to_string())),
        }
    }
}

/// A typed request. Created by a surface, consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    SummarizeText { text: String },
    CheckAuth,
    Authenticate,
    GetDirections { text: String },
    GenerateEmail(EmailRequest),
    SaveTask(TaskDraft),
    OpenPanel { tab_id: Option<u64> },
    /// Upcoming events on the user's primary calendar.
    ListEvents { max_results: u32 },
}

#[derive(Deserialize)]
struct TextPayload {
    text: String,
}

/// Legacy surfaces wrap the draft as `{task: {...}}`; newer ones send it flat.
fn unwrap_task(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.contains_key("task") => {
            map.remove("task").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn default_event_count() -> u32 {
    DEFAULT_EVENT_COUNT
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEventsPayload {
    #[serde(default = "default_event_count")]
    max_results: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenPanelPayload {
    #[serde(default)]
    tab_id: Option<u64>,
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::SummarizeText { .. } => RequestKind::SummarizeText,
            Self::CheckAuth => RequestKind::CheckAuth,
            Self::Authenticate => RequestKind::Authenticate,
            Self::GetDirections { .. } => RequestKind::GetDirections,
            Self::GenerateEmail(_) => RequestKind::GenerateEmail,
            Self::SaveTask(_) => RequestKind::SaveTask,
            Self::OpenPanel { .. } => RequestKind::OpenPanel,
            Self::ListEvents { .. } => RequestKind::ListEvents,
        }
    }

    /// Decode a wire envelope into a typed request.
    pub fn from_envelope(envelope: Envelope) -> Result<Self, DispatchError> {
        let kind: RequestKind = envelope.kind.parse()?;
        let payload = envelope.payload_value();

        let request = match kind {
            RequestKind::SummarizeText => Self::SummarizeText {
                text: decode::<TextPayload>(kind, payload)?.text,
            },
            RequestKind::CheckAuth => Self::CheckAuth,
            RequestKind::Authenticate => Self::Authenticate,
            RequestKind::GetDirections => Self::GetDirections {
                text: decode::<TextPayload>(kind, payload)?.text,
            },
            RequestKind::GenerateEmail => Self::GenerateEmail(decode(kind, payload)?),
            RequestKind::SaveTask => Self::SaveTask(decode(kind, unwrap_task(payload))?),
            RequestKind::OpenPanel => Self::OpenPanel {
                tab_id: decode::<OpenPanelPayload>(kind, payload)?.tab_id,
            },
            RequestKind::ListEvents => Self::ListEvents {
                max_results: decode::<ListEventsPayload>(kind, payload)?.max_results,
            },
        };
        Ok(request)
    }
}

fn decode<T: DeserializeOwned>(kind: RequestKind, payload: Value) -> Result<T, DispatchError> {
    serde_json::from_value(payload).map_err(|e| DispatchError::InvalidPayload {
        kind,
        message: e.to_string(),
    })
}

/// Untyped request as sent over the wire: `{kind, payload}`.
///
/// Legacy messages of the form `{type, text, ...}` (or `{action, ...}`) are
/// accepted too; when `payload` is absent the remaining top-level fields are
/// used instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(alias = "type", alias = "action")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
            extra: Map::new(),
        }
    }

    fn payload_value(self) -> Value {
        if self.payload.is_null() {
            Value::Object(self.extra)
        } else {
            self.payload
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
