//! Flow input assembly from `-i key=value` pairs and JSON files

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

use trendify::InvocationInput;

/// Parse `key=value`; the value is JSON when it parses, else a plain string
pub fn parse_pair(pair: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = pair.split_once('=') else {
        bail!("Invalid input '{}': expected key=value", pair);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid input '{}': empty key", pair);
    }

    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Merge a JSON object file (optional) with pairs; pairs win
pub fn build_input(file_content: Option<&str>, pairs: &[String]) -> Result<InvocationInput> {
    let mut input = match file_content {
        Some(content) => match serde_json::from_str::<Value>(content)
            .context("Input file is not valid JSON")?
        {
            Value::Object(map) => map,
            _ => bail!("Input file must contain a JSON object"),
        },
        None => InvocationInput::new(),
    };

    for pair in pairs {
        let (key, value) = parse_pair(pair)?;
        input.insert(key, value);
    }

    Ok(input)
}

/// MIME type from a file extension, for `--attach` without `--mime`
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => return None,
    };
    Some(mime)
}
