//! Tolerant parsing of model output that should carry an intent object.

use super::Intent;
use crate::error::AdapterError;

/// Parse raw model output into an [`Intent`].
///
/// Tries, in order: the whole output, the first balanced `{...}` object,
/// and the span from the first `{` to the last `}`.
pub fn parse_intent_output(raw: &str) -> Result<Intent, AdapterError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AdapterError::InvalidResponse("empty model output".to_string()));
    }

    if let Ok(intent) = serde_json::from_str::<Intent>(trimmed) {
        return Ok(intent);
    }

    if let Some(object) = first_json_object(trimmed) {
        if let Ok(intent) = serde_json::from_str::<Intent>(object) {
            return Ok(intent);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(intent) = serde_json::from_str::<Intent>(&trimmed[start..=end]) {
                return Ok(intent);
            }
        }
    }

    Err(AdapterError::InvalidResponse(format!(
        "no intent object in model output: {}",
        truncate(trimmed, 80)
    )))
}

/// Returns the first brace-balanced object, skipping braces inside strings.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
#[path = "intent_tests.rs"]
mod tests;
