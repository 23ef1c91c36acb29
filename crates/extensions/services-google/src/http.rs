//! Shared response handling for Google JSON APIs.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use highlighter_protocols::AdapterError;

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GoogleErrorDetail {
    Structured { message: String },
    Code(String),
}

pub(crate) fn transport_error(e: reqwest::Error) -> AdapterError {
    if e.is_timeout() {
        AdapterError::Unavailable(format!("request timed out: {}", e))
    } else {
        AdapterError::Transport(e.to_string())
    }
}

/// Read a response body, mapping non-success statuses and parse failures.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AdapterError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(AdapterError::from_status(status.as_u16(), error_message(&body)));
    }

    serde_json::from_str(&body)
        .map_err(|e| AdapterError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

/// Extract `error.message` (or a bare `error` code) from a Google error body.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(GoogleErrorBody {
            error: GoogleErrorDetail::Structured { message },
        }) => message,
        Ok(GoogleErrorBody {
            error: GoogleErrorDetail::Code(code),
        }) => code,
        Err(_) => body.trim().to_string(),
    }
}
