//! Username recovery from a post's discovery metadata.
//!
//! `discovery_input` is whatever the scrape job recorded as its seed: a raw
//! profile URL, a JSON-encoded object carrying a `url` field, or garbage.
//! Extraction never fails — malformed input degrades to an empty username,
//! which downstream matching treats as "no match".

use regex::Regex;
use serde_json::Value;
use trackscope_core::Platform;

/// Recovers the target account's username from a post's `discovery_input`.
///
/// Resolution order:
/// 1. If the input parses as JSON and carries a string `url` field, the
///    platform's profile-URL pattern is applied to that field.
/// 2. If JSON parsing fails but the raw input contains the platform domain,
///    the same pattern is applied to the raw input.
/// 3. Anything else yields the empty string.
///
/// The returned username is trimmed; case is preserved (matching is
/// case-insensitive downstream).
#[must_use]
pub fn extract_username(platform: Platform, discovery_input: &str) -> String {
    let pattern = Regex::new(platform.username_pattern()).expect("valid username regex");

    match serde_json::from_str::<Value>(discovery_input) {
        Ok(value) => value
            .get("url")
            .and_then(Value::as_str)
            .map(|url| capture_username(&pattern, url))
            .unwrap_or_default(),
        Err(_) => {
            if discovery_input.contains(platform.domain()) {
                capture_username(&pattern, discovery_input)
            } else {
                String::new()
            }
        }
    }
}

/// Applies the profile-URL pattern and returns the trimmed capture, or empty.
pub(crate) fn capture_username(pattern: &Regex, input: &str) -> String {
    pattern
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .unwrap_or_default()
}
