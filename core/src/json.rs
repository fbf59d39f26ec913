//! # JSON Output
//!
//! Pretty printing with a caller-chosen indent. Collections are written with
//! four spaces, embedded request bodies with four, patched documents with two.

use crate::error::AppResult;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Four-space indent.
pub const INDENT_4: &[u8] = b"    ";

/// Two-space indent.
pub const INDENT_2: &[u8] = b"  ";

/// Serializes `value` as pretty JSON using `indent` for each nesting level.
pub fn to_string_indented<T: Serialize + ?Sized>(value: &T, indent: &[u8]) -> AppResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent);
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| format!("Serialized JSON is not UTF-8: {}", e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_four_space_indent() {
        let out = to_string_indented(&json!({"a": [1]}), INDENT_4).unwrap();
        assert_eq!(out, "{\n    \"a\": [\n        1\n    ]\n}");
    }

    #[test]
    fn test_empty_containers_stay_inline() {
        let out = to_string_indented(&json!({"a": {}, "b": []}), INDENT_2).unwrap();
        assert_eq!(out, "{\n  \"a\": {},\n  \"b\": []\n}");
    }
}
