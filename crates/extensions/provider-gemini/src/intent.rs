//! Destination extraction backed by Gemini.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use highlighter_protocols::{parse_intent_output, AdapterError, Intent, IntentExtractor};

use crate::client::GeminiClient;
use crate::types::{GenerateContentRequest, GenerationConfig};

const SYSTEM_PROMPT: &str = r#"You extract location information from text.
The user selected some text and wants directions to a place mentioned in it.

Find the most likely destination: a specific address, place name or point of interest.
If several places are mentioned, pick the most specific one.

Respond with a JSON object of this shape:
{"destination": "the extracted destination", "confidence": "high|medium|low", "reason": "why this place was chosen"}

If no destination can be determined, respond with:
{"destination": null, "confidence": "none", "reason": "why no destination was found"}"#;

pub struct GeminiIntentExtractor {
    client: Arc<GeminiClient>,
}

impl GeminiIntentExtractor {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntentExtractor for GeminiIntentExtractor {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn extract_destination(&self, text: &str) -> Result<Intent, AdapterError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AdapterError::InvalidInput("No text provided to analyze".to_string()));
        }

        let request = GenerateContentRequest::prompt(text)
            .with_system(SYSTEM_PROMPT)
            .with_config(GenerationConfig {
                temperature: Some(0.2),
                top_k: Some(40),
                max_output_tokens: None,
            });
        let raw = self.client.generate_text(&request).await?;
        let intent = parse_intent_output(&raw)?;
        debug!(
            "Extracted destination {:?} ({})",
            intent.destination, intent.confidence
        );
        Ok(intent)
    }
}
