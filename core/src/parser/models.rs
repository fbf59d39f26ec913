//! # Data Models
//!
//! Intermediate Representation (IR) structures for scraped C# source.

/// A located `public record Name(...)` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationMatch {
    /// The declared record name.
    pub name: String,
    /// The raw text between the parentheses, possibly spanning several lines.
    pub raw_args: String,
}

/// A `(name, declared type)` pair taken from a constructor argument or auto-property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProperty {
    /// The parameter / property name, casing preserved.
    pub name: String,
    /// The textual type annotation (e.g. `string?`, `List<Guid>`).
    pub ty: String,
}

impl ParsedProperty {
    /// Builds a property from borrowed parts.
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }
}

/// One routable action scraped from a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEndpoint {
    /// The C# action method name.
    pub name: String,
    /// Upper-case HTTP verb (`GET`, `POST`, ...).
    pub method: String,
    /// Full route without leading or trailing slash.
    pub path: String,
    /// Declared type of the `[FromBody]` parameter, if any.
    pub body_type: Option<String>,
}

/// A controller class and its endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedController {
    /// Class name minus the `Controller` suffix.
    pub name: String,
    /// Endpoints in source order.
    pub endpoints: Vec<ParsedEndpoint>,
}
