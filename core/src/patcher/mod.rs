#![deny(missing_docs)]

//! # Patching
//!
//! One-off rewrites of files produced by, or consumed by, the generator.
//!
//! - **swagger**: un-gating `UseSwagger()` in service bootstrap files.
//! - **collection**: moving a field out of an existing collection into a header.
//! - **markdown**: removing the same field from README request examples.

/// Field strip over collection documents.
pub mod collection;

/// Field strip over markdown documents.
pub mod markdown;

/// Bootstrap file patching.
pub mod swagger;

pub use collection::{strip_field, FieldStrip, StripStats};
pub use markdown::strip_field_from_markdown;
pub use swagger::{patch_swagger_tree, ungate_swagger, SwaggerPatchReport};
