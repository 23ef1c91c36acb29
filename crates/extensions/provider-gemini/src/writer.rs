//! Email drafting backed by Gemini.

use std::sync::Arc;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

use highlighter_protocols::{AdapterError, ComposedEmail, EmailComposer, EmailRequest};

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

const COMPOSE_URL: &str = "https://mail.google.com/mail/";

static SUBJECT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*Subject:\s+(.*)$").expect("subject pattern is valid"));

pub struct GeminiEmailWriter {
    client: Arc<GeminiClient>,
}

impl GeminiEmailWriter {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmailComposer for GeminiEmailWriter {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn compose(&self, request: &EmailRequest) -> Result<ComposedEmail, AdapterError> {
        if request.selected_text.trim().is_empty() {
            return Err(AdapterError::InvalidInput("No text selected".to_string()));
        }

        let prompt = format!(
            "Compose an email for the following purpose: {}. Use a {} tone, plain text, \
             and start with a 'Subject:' line. Here is the context:\n\n{}",
            request.purpose, request.tone, request.selected_text
        );
        let draft = self
            .client
            .generate_text(&GenerateContentRequest::prompt(prompt))
            .await?;

        let (subject, body) = split_subject(&draft);
        debug!("Drafted email, subject {:?}", subject);
        let compose_url = compose_url(&subject, &body)?;
        Ok(ComposedEmail {
            subject,
            body,
            compose_url,
        })
    }
}

/// Split a drafted email into its `Subject:` line and the remaining body.
/// Without a subject line the subject is empty and the body is the whole text.
pub fn split_subject(draft: &str) -> (String, String) {
    let Some(caps) = SUBJECT_LINE.captures(draft) else {
        return (String::new(), draft.trim().to_string());
    };
    let subject = caps[1].trim().to_string();
    let line = caps.get(0).map_or(0..0, |m| m.range());
    let body = format!("{}{}", &draft[..line.start], &draft[line.end..]);
    (subject, body.trim().to_string())
}

/// Gmail compose window prefilled with `subject` and `body`.
pub fn compose_url(subject: &str, body: &str) -> Result<String, AdapterError> {
    let mut url = Url::parse(COMPOSE_URL)
        .map_err(|e| AdapterError::InvalidInput(format!("bad compose URL: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("view", "cm")
        .append_pair("fs", "1")
        .append_pair("su", subject)
        .append_pair("body", body);
    Ok(url.to_string())
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
