//! Replies delivered back to UI surfaces.

use serde::Serialize;

use crate::adapter::{CalendarEvent, ComposedEmail, Confidence, CreatedTask, UserInfo};
use crate::error::ErrorCode;

/// Kind-specific reply fields, flattened into the reply object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyPayload {
    Summary {
        summary: String,
    },
    AuthStatus {
        authenticated: bool,
    },
    SignIn {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<UserInfo>,
    },
    Directions {
        url: String,
        destination: String,
        confidence: Confidence,
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        route: Option<serde_json::Value>,
    },
    Email {
        subject: String,
        body: String,
        #[serde(rename = "composeUrl")]
        compose_url: String,
    },
    Task {
        id: String,
        #[serde(rename = "listId")]
        list_id: String,
    },
    PanelOpened {
        #[serde(rename = "tabId")]
        tab_id: u64,
    },
    Events {
        events: Vec<CalendarEvent>,
    },
}

impl From<ComposedEmail> for ReplyPayload {
    fn from(email: ComposedEmail) -> Self {
        Self::Email {
            subject: email.subject,
            body: email.body,
            compose_url: email.compose_url,
        }
    }
}

impl From<CreatedTask> for ReplyPayload {
    fn from(task: CreatedTask) -> Self {
        Self::Task {
            id: task.id,
            list_id: task.list_id,
        }
    }
}

/// The single reply to a request.
///
/// Serializes as `{ok, ...payload, error?, message?, requiresAuth?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub ok: bool,

    #[serde(flatten)]
    pub payload: Option<ReplyPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,

    /// Short human-readable description of the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_auth: Option<bool>,
}

impl Reply {
    pub fn success(payload: ReplyPayload) -> Self {
        Self {
            ok: true,
            payload: Some(payload),
            error: None,
            message: None,
            requires_auth: None,
        }
    }

    /// Success with no kind-specific fields.
    pub fn ok() -> Self {
        Self {
            ok: true,
            payload: None,
            error: None,
            message: None,
            requires_auth: None,
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload: None,
            error: Some(code),
            message: Some(message.into()),
            requires_auth: code.requires_auth().then_some(true),
        }
    }

    pub fn with_payload(mut self, payload: ReplyPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = Some(requires_auth);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth.unwrap_or(false)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({ "ok": false, "error": ErrorCode::HandlerFailed, "message": e.to_string() })
        })
    }
}

#[cfg(test)]
#[path = "reply_tests.rs"]
mod tests;
