const MAX_EXCERPT_CHARS: usize = 80;

// Credential markers occasionally pasted into documents or questions.
const SECRET_MARKERS: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shorten document or question text for log lines. Uploaded contracts are
/// confidential; logs carry only a bounded prefix with credential-looking
/// values blanked out, plus the total length.
pub fn log_excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let excerpt = if total_chars <= MAX_EXCERPT_CHARS {
        trimmed.to_string()
    } else {
        let prefix: String = trimmed.chars().take(MAX_EXCERPT_CHARS).collect();
        format!("{}... ({} chars total)", prefix, total_chars)
    };

    redact_secrets(excerpt)
}

fn redact_secrets(text: String) -> String {
    let mut result = text;
    for marker in SECRET_MARKERS {
        if let Some(start) = result.find(marker) {
            let value_start = start + marker.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result.replace_range(value_start..value_end, "[REDACTED]");
        }
    }
    result
}
