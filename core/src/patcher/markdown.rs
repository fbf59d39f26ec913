//! # Markdown Field Strip
//!
//! Removes a field from the JSON examples of in-scope endpoints in an API
//! README. Endpoints are `#### ` headings; examples are ```` ```json ```` fences.

use crate::patcher::collection::{field_variants, FieldStrip};
use regex::Regex;
use std::sync::OnceLock;

fn dangling_comma_regex() -> &'static Regex {
    static COMMA_RE: OnceLock<Regex> = OnceLock::new();
    COMMA_RE.get_or_init(|| Regex::new(r",\s*\}").expect("Invalid regex"))
}

/// Drops lines mentioning the field inside JSON examples of in-scope endpoints,
/// then repairs the dangling commas this leaves behind.
///
/// The comma repair runs over the whole document.
pub fn strip_field_from_markdown(content: &str, cfg: &FieldStrip) -> String {
    let quoted: Vec<String> = field_variants(&cfg.field)
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect();

    let mut out = String::with_capacity(content.len());
    let mut in_scope = false;
    let mut in_json = false;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        if line.starts_with("#### ") {
            in_scope = line.contains(&cfg.scope);
        } else if trimmed == "```json" {
            in_json = true;
        } else if trimmed == "```" {
            in_json = false;
        } else if in_scope && in_json && quoted.iter().any(|q| line.contains(q.as_str())) {
            continue;
        }
        out.push_str(line);
    }

    dangling_comma_regex()
        .replace_all(&out, "\n  }")
        .into_owned()
}
