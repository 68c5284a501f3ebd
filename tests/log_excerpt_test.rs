use lexguard::infrastructure::observability::log_excerpt;

#[test]
fn given_short_text_when_building_excerpt_then_text_passes_through() {
    assert_eq!(log_excerpt("What does clause 4 mean?"), "What does clause 4 mean?");
}

#[test]
fn given_empty_text_when_building_excerpt_then_placeholder_is_returned() {
    assert_eq!(log_excerpt("   "), "[EMPTY]");
}

#[test]
fn given_long_text_when_building_excerpt_then_prefix_and_total_length_are_reported() {
    let text = "a".repeat(200);

    let excerpt = log_excerpt(&text);

    assert!(excerpt.starts_with(&"a".repeat(80)));
    assert!(excerpt.ends_with("(200 chars total)"));
}

#[test]
fn given_multibyte_text_when_truncating_then_no_panic_on_char_boundaries() {
    let text = "§".repeat(200);

    let excerpt = log_excerpt(&text);

    assert!(excerpt.contains("(200 chars total)"));
}

#[test]
fn given_bearer_credential_when_building_excerpt_then_value_is_redacted() {
    let excerpt = log_excerpt("see header Bearer sk-12345 for access");

    assert_eq!(excerpt, "see header Bearer [REDACTED] for access");
}

#[test]
fn given_key_value_secret_when_building_excerpt_then_value_is_redacted() {
    let excerpt = log_excerpt("connect with api_key=abc123&user=jane");

    assert!(excerpt.contains("api_key=[REDACTED]"));
    assert!(!excerpt.contains("abc123"));
    assert!(excerpt.contains("user=jane"));
}

#[test]
fn given_trailing_password_when_building_excerpt_then_redaction_runs_to_end() {
    let excerpt = log_excerpt("login with password=hunter2");

    assert_eq!(excerpt, "login with password=[REDACTED]");
}
