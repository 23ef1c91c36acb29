//! # Highlighter Provider - Gemini
//!
//! Language-model adapters backed by the Gemini `generateContent` API:
//! summarization, destination extraction and email drafting.

mod client;
mod intent;
mod summarizer;
mod types;
mod writer;

pub use client::{GeminiClient, DEFAULT_MODEL};
pub use intent::GeminiIntentExtractor;
pub use summarizer::GeminiSummarizer;
pub use types::*;
pub use writer::{compose_url, split_subject, GeminiEmailWriter};
