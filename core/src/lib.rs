#![deny(missing_docs)]

//! # Postgen Core
//!
//! Heuristic scraping of a C# microservice tree into example request bodies
//! and an API-testing collection, plus the patch tools used on the results.

/// Shared error types.
pub mod error;

/// Regex based source scraping (records, auto-properties, controllers).
pub mod parser;

/// Declared type to example value mapping.
pub mod sample;

/// Type name to source file lookup.
pub mod resolver;

/// Example request body generation.
pub mod body;

/// Collection document generation.
pub mod collection;

/// Pretty JSON output.
pub mod json;

/// Patch tools for sources, collections and docs.
pub mod patcher;

/// Brace balance checking.
pub mod braces;

pub use body::{body_from_properties, generate_body_for_type};
pub use braces::{check_braces, BraceReport};
pub use collection::{build_collection, write_collection, CollectionOptions, GeneratedCollection};
pub use error::{AppError, AppResult};
pub use parser::{
    declare_argument, extract_properties, locate_declaration, parse_controller, split_arguments,
    DeclarationMatch, ParsedController, ParsedEndpoint, ParsedProperty,
};
pub use patcher::{
    patch_swagger_tree, strip_field, strip_field_from_markdown, FieldStrip, SwaggerPatchReport,
};
pub use resolver::TypeIndex;
pub use sample::{generate_sample_value, SampleSource, SystemSource};
