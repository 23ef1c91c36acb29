//! Gemini API client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use highlighter_protocols::AdapterError;

use crate::types::*;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Gemini API client.
///
/// A client without an API key can be constructed; every call then fails
/// with [`AdapterError::Unavailable`].
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_url(api_key, BASE_URL.to_string())
    }

    /// Create a client against a custom endpoint.
    pub fn with_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            client: build_client(Duration::from_secs(60)),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate content and return the full response.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AdapterError> {
        let Some(api_key) = &self.api_key else {
            return Err(AdapterError::Unavailable(
                "Gemini API key is not configured".to_string(),
            ));
        };
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        debug!("Gemini generate_content: model={}", self.model);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => e.error.message,
                Err(_) => body,
            };
            return Err(AdapterError::from_status(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| {
            AdapterError::InvalidResponse(format!("Failed to parse Gemini response: {}", e))
        })
    }

    /// Generate content and return the text of the first candidate.
    pub async fn generate_text(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, AdapterError> {
        let response = self.generate_content(request).await?;
        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(AdapterError::InvalidResponse(
                "Gemini returned no text".to_string(),
            )),
        }
    }
}

fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn transport_error(e: reqwest::Error) -> AdapterError {
    if e.is_timeout() {
        AdapterError::Unavailable(format!("Gemini request timed out: {}", e))
    } else {
        AdapterError::Transport(e.to_string())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
