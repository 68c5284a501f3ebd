use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SPLIT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").unwrap());

/// Clean up decoder output before it is embedded in a prompt: NFKC-normalize
/// ligatures, rejoin words hyphenated across line breaks, drop non-printing
/// control characters, and collapse whitespace so blank-line runs become
/// single paragraph breaks.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    let rejoined = SPLIT_WORD.replace_all(&normalized, "$head$tail");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in rejoined.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(&words.join(" "));
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n\n")
}
