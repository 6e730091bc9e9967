//! Recovery of the JSON payload from raw model output
//!
//! Models frequently wrap JSON in a Markdown code fence even when asked not
//! to. The fence, if present, must span the entire reply.

use regex::Regex;
use std::sync::OnceLock;

fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Opening fence, optional language tag line, lazy body, closing fence at end of text.
        Regex::new(r"(?s)^```(?:[\w+.\-]*[ \t]*\r?\n|json\b)?(.*?)\s*```$")
            .expect("fence pattern is valid")
    })
}

fn strip_fence(text: &str) -> Option<&str> {
    fence_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim())
}

/// Return the JSON payload carried by a raw model reply
///
/// Surrounding whitespace is removed. A reply that is entirely a fenced block
/// yields the fence body; nested fences are unwrapped until none remain, so
/// applying this to its own output is a no-op. Text without a fence passes
/// through trimmed. An empty fence yields an empty string, which callers
/// reject at the decode step.
pub fn extract_json_payload(raw: &str) -> &str {
    let mut payload = raw.trim();
    while let Some(inner) = strip_fence(payload) {
        payload = inner;
    }
    payload
}
