//! Summarizer backed by Gemini.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use highlighter_protocols::{AdapterError, Summarizer};

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

const SUMMARY_PROMPT: &str =
    "Summarize concisely (3-5 bullets). Keep key facts, dates, and names if present:\n\n";

pub struct GeminiSummarizer {
    client: Arc<GeminiClient>,
}

impl GeminiSummarizer {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn summarize(&self, text: &str) -> Result<String, AdapterError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AdapterError::InvalidInput("No text to summarize".to_string()));
        }
        if !self.client.is_configured() {
            return Err(AdapterError::Unavailable(
                "summarizer is not configured".to_string(),
            ));
        }

        debug!("Summarizing {} chars", text.len());
        let request = GenerateContentRequest::prompt(format!("{}{}", SUMMARY_PROMPT, text));
        let summary = self.client.generate_text(&request).await?;
        Ok(summary.trim().to_string())
    }
}
