//! JSON extraction from free-form model output
//!
//! Models asked for JSON still wrap it in prose or markdown fences now
//! and then. Candidates are tried in a fixed order:
//! 1. the whole (trimmed) text
//! 2. each triple-backtick fenced block, optionally tagged (```json)
//! 3. the span from the first `{` to the last `}`
//!
//! The first candidate that parses wins.

use serde_json::Value;

use crate::domain::errors::InvocationError;

const FENCE: &str = "```";
const PREVIEW_CHARS: usize = 120;

pub fn extract_json(text: &str) -> Result<Value, InvocationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InvocationError::Extraction(
            "model returned an empty response".to_string(),
        ));
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    for block in fenced_blocks(text) {
        if let Ok(value) = serde_json::from_str::<Value>(block) {
            return Ok(value);
        }
    }

    if let Some(span) = brace_span(text) {
        if let Ok(value) = serde_json::from_str::<Value>(span) {
            return Ok(value);
        }
    }

    Err(InvocationError::Extraction(format!(
        "no JSON found in model response (preview: {})",
        text.chars().take(PREVIEW_CHARS).collect::<String>()
    )))
}

/// Contents of every closed fenced block, language tag stripped
fn fenced_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(FENCE) {
        let after = &rest[start + FENCE.len()..];
        // Skip a language tag such as `json` right after the fence.
        let tag_len = after
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after.len());
        let body = &after[tag_len..];

        let Some(end) = body.find(FENCE) else {
            break;
        };
        blocks.push(body[..end].trim());
        rest = &body[end + FENCE.len()..];
    }

    blocks
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
