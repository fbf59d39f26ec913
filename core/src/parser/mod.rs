#![deny(missing_docs)]

//! # Parser Module
//!
//! Heuristic scraping of C# source text with regular expressions.
//! Extracts record constructor arguments, auto-properties and controller routes.

pub mod controller;
pub mod models;
pub mod record;

pub use controller::{find_body_type, join_route, parse_controller};
pub use models::{DeclarationMatch, ParsedController, ParsedEndpoint, ParsedProperty};
pub use record::{
    declare_argument, extract_auto_properties, extract_properties, flatten_whitespace,
    locate_declaration, parse_declaration, split_arguments,
};
