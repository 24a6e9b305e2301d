//! Keyed response parser
//!
//! Extracts the expected fields from raw oracle output. JSON first: the
//! text between the outermost braces is parsed as an object and the
//! requested keys are pulled from it. When that fails (truncated
//! output, stray prose around the braces, mismatched quotes), a per-key
//! regex fallback recovers whatever field values it can. Fields that
//! survive neither pass are simply absent; extraction never errors.

use plenum_application::ResponseParser;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// JSON-first, regex-fallback field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyedResponseParser;

impl KeyedResponseParser {
    pub fn new() -> Self {
        Self
    }

    fn extract_json(slice: &str, keys: &[&str]) -> Option<BTreeMap<String, String>> {
        let Value::Object(map) = serde_json::from_str::<Value>(slice).ok()? else {
            return None;
        };

        let mut fields = BTreeMap::new();
        for key in keys {
            match map.get(*key) {
                Some(Value::String(s)) => {
                    fields.insert(key.to_string(), s.clone());
                }
                Some(Value::Null) | None => {}
                // Non-string values are kept in their compact JSON form.
                Some(other) => {
                    fields.insert(key.to_string(), other.to_string());
                }
            }
        }
        Some(fields)
    }

    fn extract_regex(text: &str, keys: &[&str]) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();

        for key in keys {
            let escaped = regex::escape(key);

            // Quoted value: "key": "..."
            let quoted = Regex::new(&format!(
                r#"(?s)"{escaped}"\s*:\s*"((?:[^"\\]|\\.)*)""#
            ));
            if let Ok(re) = quoted
                && let Some(captures) = re.captures(text)
                && let Some(value) = captures.get(1)
            {
                fields.insert(key.to_string(), unescape(value.as_str()));
                continue;
            }

            // Bare value: "key": Yes
            let bare = Regex::new(&format!(r#""{escaped}"\s*:\s*([^,{{}}\n]+)"#));
            if let Ok(re) = bare
                && let Some(captures) = re.captures(text)
                && let Some(value) = captures.get(1)
            {
                let trimmed = value.as_str().trim();
                if !trimmed.is_empty() {
                    fields.insert(key.to_string(), trimmed.to_string());
                }
            }
        }

        fields
    }
}

impl ResponseParser for KeyedResponseParser {
    fn extract(&self, raw: &str, keys: &[&str]) -> BTreeMap<String, String> {
        let slice = match (raw.find('{'), raw.rfind('}')) {
            (Some(start), Some(end)) if start < end => &raw[start..=end],
            _ => raw,
        };

        if let Some(fields) = Self::extract_json(slice, keys) {
            return fields;
        }

        debug!("structured parse failed, falling back to regex extraction");
        Self::extract_regex(slice, keys)
    }
}

fn unescape(value: &str) -> String {
    value
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\\\", "\\")
}
