#![deny(missing_docs)]

//! # Request Bodies
//!
//! Builds example JSON payloads for request DTOs by combining the type index,
//! the record parser and the sample value table.

use crate::parser::ParsedProperty;
use crate::resolver::TypeIndex;
use crate::sample::{generate_sample_value, SampleSource};
use serde_json::{json, Map, Value};

/// Builds an object from properties, in declaration order.
///
/// Properties whose type matches no sample rule become `"Type: <declared>"`.
pub fn body_from_properties(props: &[ParsedProperty], source: &dyn SampleSource) -> Value {
    let mut body = Map::new();
    for prop in props {
        let value = generate_sample_value(&prop.ty, &prop.name, source)
            .unwrap_or_else(|| Value::String(format!("Type: {}", prop.ty)));
        body.insert(prop.name.clone(), value);
    }
    Value::Object(body)
}

/// The marker emitted when a body type cannot be resolved or parsed.
pub fn unparsed_marker(type_name: &str) -> Value {
    json!({ "error": format!("Could not parse type {}", type_name) })
}

/// Generates an example body for the DTO named `type_name`.
///
/// Never fails: an unknown type, an unreadable file, an unbalanced argument
/// list or a declaration without usable properties all produce the
/// `unparsed_marker` object instead.
pub fn generate_body_for_type(
    index: &mut TypeIndex,
    type_name: &str,
    source: &dyn SampleSource,
) -> Value {
    match index.type_properties(type_name) {
        Ok(props) if !props.is_empty() => body_from_properties(&props, source),
        _ => unparsed_marker(type_name),
    }
}
