//! # Record Parsing
//!
//! Locates primary-constructor `record` declarations and turns their argument
//! lists into ordered `(name, type)` pairs.
//!
//! The splitter and the declarator are the single shared implementation used by
//! the body builder, the controller scraper and the record inspector.

use crate::error::{AppError, AppResult};
use crate::parser::models::{DeclarationMatch, ParsedProperty};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

fn record_regex() -> &'static Regex {
    static RECORD_RE: OnceLock<Regex> = OnceLock::new();
    RECORD_RE.get_or_init(|| {
        Regex::new(r"(?s)public\s+record\s+(\w+)\s*\((.*?)\)").expect("Invalid regex")
    })
}

fn auto_property_regex() -> &'static Regex {
    static PROP_RE: OnceLock<Regex> = OnceLock::new();
    PROP_RE.get_or_init(|| {
        Regex::new(r"public\s+([\w?<>\[\],.]+)\s+(\w+)\s*\{\s*get;\s*set;\s*\}")
            .expect("Invalid regex")
    })
}

/// Finds the first `public record Name(...)` declaration in `content`.
///
/// Further declarations in the same file are ignored.
pub fn locate_declaration(content: &str) -> Option<DeclarationMatch> {
    let caps = record_regex().captures(content)?;
    Some(DeclarationMatch {
        name: caps.get(1)?.as_str().to_string(),
        raw_args: caps.get(2)?.as_str().to_string(),
    })
}

/// Collapses every whitespace run (newlines included) to a single space.
pub fn flatten_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits `input` on characters matching `is_separator` that sit outside `<...>`.
///
/// Every separator closes a segment; text after the last separator becomes a
/// segment only when non-empty. Fails when brackets do not balance.
fn split_top_level<F>(input: &str, is_separator: F) -> AppResult<Vec<String>>
where
    F: Fn(char) -> bool,
{
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for ch in input.chars() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return Err(AppError::Parse(format!(
                        "unexpected '>' in argument list `{}`",
                        input
                    )));
                }
            }
            _ => {}
        }

        if depth == 0 && is_separator(ch) {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    if depth != 0 {
        return Err(AppError::Parse(format!(
            "unterminated '<' in argument list `{}`",
            input
        )));
    }

    if !current.is_empty() {
        segments.push(current);
    }

    Ok(segments)
}

/// Splits a constructor argument list on top-level commas.
///
/// The input is flattened first, so multi-line declarations behave like
/// single-line ones. Commas inside generic arguments (`Dictionary<string, int>`)
/// do not split.
///
/// # Errors
///
/// Returns `AppError::Parse` when the angle brackets are unbalanced.
pub fn split_arguments(raw: &str) -> AppResult<Vec<String>> {
    let flat = flatten_whitespace(raw);
    Ok(split_top_level(&flat, |c| c == ',')?
        .into_iter()
        .map(|arg| arg.trim().to_string())
        .collect())
}

/// Interprets one argument (`Type Name`, `Type? Name = default`) as a property.
///
/// The default-value clause is dropped, the last token is the name and the one
/// before it the type; leading qualifiers are ignored. Returns `None` when fewer
/// than two tokens remain.
pub fn declare_argument(arg: &str) -> Option<ParsedProperty> {
    let decl = arg.split('=').next().unwrap_or_default().trim();

    let tokens: Vec<String> = match split_top_level(decl, char::is_whitespace) {
        Ok(parts) => parts.into_iter().filter(|t| !t.is_empty()).collect(),
        Err(_) => decl.split_whitespace().map(str::to_string).collect(),
    };

    match tokens.as_slice() {
        [.., ty, name] => Some(ParsedProperty::new(name, ty)),
        _ => None,
    }
}

/// Parses the argument list of a located declaration into ordered properties.
///
/// A repeated name keeps its first position and takes the later type.
pub fn parse_declaration(declaration: &DeclarationMatch) -> AppResult<Vec<ParsedProperty>> {
    let args = split_arguments(&declaration.raw_args)?;
    Ok(dedup(args.iter().filter_map(|arg| declare_argument(arg))))
}

/// Extracts every `public Type Name { get; set; }` auto-property in source order.
pub fn extract_auto_properties(content: &str) -> Vec<ParsedProperty> {
    let found = auto_property_regex().captures_iter(content).filter_map(|caps| {
        let ty = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();
        Some(ParsedProperty::new(name, ty))
    });
    dedup(found)
}

/// Extracts the properties of the type declared in `content`.
///
/// A primary-constructor record wins; without one the auto-properties are used.
/// An empty list means nothing usable was found.
///
/// # Errors
///
/// Propagates `AppError::Parse` from the argument splitter.
pub fn extract_properties(content: &str) -> AppResult<Vec<ParsedProperty>> {
    match locate_declaration(content) {
        Some(declaration) => parse_declaration(&declaration),
        None => Ok(extract_auto_properties(content)),
    }
}

fn dedup(props: impl Iterator<Item = ParsedProperty>) -> Vec<ParsedProperty> {
    let mut ordered: IndexMap<String, String> = IndexMap::new();
    for prop in props {
        ordered.insert(prop.name, prop.ty);
    }
    ordered
        .into_iter()
        .map(|(name, ty)| ParsedProperty { name, ty })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_multiline_record() {
        let code = r#"
namespace Auth.Application.Features.Auth.Commands.RegisterUser;

public record RegisterUserCommand(
    string Email,
    string Password,
    Guid AppId
) : IRequest<Guid>;
"#;
        let found = locate_declaration(code).unwrap();
        assert_eq!(found.name, "RegisterUserCommand");
        assert!(found.raw_args.contains("string Email"));
        assert!(found.raw_args.contains('\n'));
    }

    #[test]
    fn test_locate_first_record_only() {
        let code = "public record A(int X); public record B(int Y);";
        let found = locate_declaration(code).unwrap();
        assert_eq!(found.name, "A");
        assert_eq!(found.raw_args, "int X");
    }

    #[test]
    fn test_locate_missing() {
        assert!(locate_declaration("public class Plain { }").is_none());
    }

    #[test]
    fn test_split_simple_list() {
        let args = split_arguments("string Email, string Password, Guid AppId").unwrap();
        assert_eq!(args, vec!["string Email", "string Password", "Guid AppId"]);
    }

    #[test]
    fn test_split_keeps_generic_commas() {
        let args = split_arguments("Guid Id, Dictionary<string,int> Meta, bool Active").unwrap();
        assert_eq!(args, vec!["Guid Id", "Dictionary<string,int> Meta", "bool Active"]);
    }

    #[test]
    fn test_split_nested_generics_across_lines() {
        let raw = "Guid Id,\n    Dictionary<string, List<int>> Buckets,\n    string Name";
        let args = split_arguments(raw).unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args[1], "Dictionary<string, List<int>> Buckets");
    }

    #[test]
    fn test_split_trailing_comma_has_no_empty_tail() {
        let args = split_arguments("int A,").unwrap();
        assert_eq!(args, vec!["int A"]);
    }

    #[test]
    fn test_split_unterminated_bracket_is_error() {
        let err = split_arguments("Foo<Bar Baz, int X").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_split_stray_closing_bracket_is_error() {
        let err = split_arguments("int> X, int Y").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_declare_with_default() {
        let prop = declare_argument("string? Bio = null").unwrap();
        assert_eq!(prop.name, "Bio");
        assert_eq!(prop.ty, "string?");
    }

    #[test]
    fn test_declare_drops_qualifiers() {
        let prop = declare_argument("[property: JsonPropertyName(\"x\")] int Count").unwrap();
        assert_eq!(prop, ParsedProperty::new("Count", "int"));
    }

    #[test]
    fn test_declare_keeps_spaced_generic_type() {
        let prop = declare_argument("Dictionary<string, int> Meta").unwrap();
        assert_eq!(prop, ParsedProperty::new("Meta", "Dictionary<string, int>"));
    }

    #[test]
    fn test_declare_skips_single_token() {
        assert!(declare_argument("Orphan").is_none());
        assert!(declare_argument("").is_none());
        assert!(declare_argument("= 5").is_none());
    }

    #[test]
    fn test_extract_record_properties_in_order() {
        let code = r#"
public record UpdateProfileCommand(
    Guid UserId,
    string? Bio = null,
    List<string> Tags,
    Dictionary<string, int> Meta);
"#;
        let props = extract_properties(code).unwrap();
        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["UserId", "Bio", "Tags", "Meta"]);
        assert_eq!(props[3].ty, "Dictionary<string, int>");
    }

    #[test]
    fn test_extract_duplicate_name_keeps_first_position() {
        let code = "public record Dup(int A, string B, long A);";
        let props = extract_properties(code).unwrap();
        assert_eq!(
            props,
            vec![ParsedProperty::new("A", "long"), ParsedProperty::new("B", "string")]
        );
    }

    #[test]
    fn test_extract_falls_back_to_auto_properties() {
        let code = r#"
public class CreateRoomRequest
{
    public string Name { get; set; }
    public int? Capacity { get; set; }
    public List<Guid> Members { get; set; }
    public string ReadOnly { get; }
}
"#;
        let props = extract_properties(code).unwrap();
        assert_eq!(
            props,
            vec![
                ParsedProperty::new("Name", "string"),
                ParsedProperty::new("Capacity", "int?"),
                ParsedProperty::new("Members", "List<Guid>"),
            ]
        );
    }

    #[test]
    fn test_extract_nothing() {
        assert!(extract_properties("// empty file").unwrap().is_empty());
    }
}
