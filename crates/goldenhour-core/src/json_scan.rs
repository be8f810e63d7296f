//! Extracts a JSON object embedded in free-text model output.

use serde_json::Value;

/// Finds the first balanced `{...}` span in `text` and parses it.
///
/// Braces inside string literals (and escaped quotes) are ignored while
/// scanning. Returns `None` when no balanced span exists or when the first
/// balanced span is not valid JSON — later spans are not tried.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, c) in text[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match c {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return serde_json::from_str(&text[start..=start + i]).ok();
                }
            }
            _ => {}
        }
    }
    None
}
