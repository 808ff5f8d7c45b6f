//! Candidate extraction from free-form model responses.

use regex::Regex;
use std::sync::OnceLock;

/// Triple-backtick fence with an optional `python` language hint.
fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:python)?\s*(.*?)```").expect("fence pattern compiles")
    })
}

/// Extract the candidate program from a model response.
///
/// Responses wrap the program in fenced code blocks and often add prose or a
/// short illustrative snippet before the full solution. When one or more
/// fenced regions exist, the longest by character count wins (ties broken by
/// first occurrence); otherwise the whole input is treated as code. The
/// result is trimmed. Never fails — a nonsensical result is the validator's
/// problem.
pub fn extract_code(text: &str) -> String {
    let mut longest: Option<(&str, usize)> = None;

    for captures in fence_pattern().captures_iter(text) {
        if let Some(body) = captures.get(1) {
            let body = body.as_str();
            // Length in characters, not bytes: multibyte text must not
            // outweigh a longer ASCII block.
            let chars = body.chars().count();
            if longest.map_or(true, |(_, longest_chars)| chars > longest_chars) {
                longest = Some((body, chars));
            }
        }
    }

    match longest {
        Some((body, _)) => body.trim().to_string(),
        None => text.trim().to_string(),
    }
}
