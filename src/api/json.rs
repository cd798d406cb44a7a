//! Extraction of JSON payloads from free-form model output.
//!
//! Models frequently wrap JSON in markdown code fences or surround it with
//! prose. This strips fences and locates the first balanced JSON object or
//! array, leaving deserialization to the caller.

/// Extract the first JSON object or array embedded in `text`.
///
/// Returns `None` when no balanced JSON value is found.
pub fn extract_json(text: &str) -> Option<&str> {
    let stripped = strip_fences(text.trim());
    let start = stripped.find(['{', '['])?;
    let candidate = &stripped[start..];
    balanced_prefix(candidate)
}

/// Remove a surrounding markdown code fence, if present.
fn strip_fences(text: &str) -> &str {
    let mut inner = text;
    if let Some(rest) = inner.strip_prefix("```json") {
        inner = rest;
    } else if let Some(rest) = inner.strip_prefix("```") {
        inner = rest;
    }
    inner.trim_start().trim_end_matches("```").trim_end()
}

/// Return the shortest prefix of `text` that is a balanced JSON value.
///
/// Tracks brace/bracket depth while skipping string literals and escapes; a
/// full parse is left to serde.
fn balanced_prefix(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..idx + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
