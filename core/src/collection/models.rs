//! # Collection Models
//!
//! Serde mirror of the subset of the Postman v2.1 collection format we emit.
//! Field order follows the format's conventional layout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema URL written into `info.schema`.
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Root document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection metadata.
    pub info: CollectionInfo,
    /// One folder per service.
    pub item: Vec<Folder<Folder<RequestItem>>>,
}

/// Collection metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Random id assigned at generation time.
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    /// Display name.
    pub name: String,
    /// Format schema URL.
    pub schema: String,
}

/// A named folder of `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder<T> {
    /// Display name.
    pub name: String,
    /// Children.
    pub item: Vec<T>,
}

impl<T> Folder<T> {
    /// Creates an empty folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: Vec::new(),
        }
    }
}

/// A single request entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    /// Display name.
    pub name: String,
    /// The request definition.
    pub request: Request,
    /// Saved example responses (always empty when generated).
    pub response: Vec<Value>,
    /// Scripts attached to the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<Event>>,
}

/// Request definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP verb.
    pub method: String,
    /// Request headers.
    pub header: Vec<Header>,
    /// Structured URL.
    pub url: Url,
    /// Optional raw body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

/// A request header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Header name.
    pub key: String,
    /// Header value.
    pub value: String,
    /// Value kind, `text` for literal values.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Header {
    /// A plain text header.
    pub fn text(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            kind: "text".to_string(),
        }
    }
}

/// Structured URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url {
    /// The full URL as typed.
    pub raw: String,
    /// Host segments.
    pub host: Vec<String>,
    /// Path segments.
    pub path: Vec<String>,
}

/// Raw request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Body mode, always `raw` here.
    pub mode: String,
    /// The serialized payload.
    pub raw: String,
    /// Editor options.
    pub options: BodyOptions,
}

/// Body editor options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOptions {
    /// Options for raw mode.
    pub raw: RawOptions,
}

/// Raw mode options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOptions {
    /// Highlighting language.
    pub language: String,
}

/// A script hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Hook name (`test`, `prerequest`).
    pub listen: String,
    /// The script.
    pub script: Script,
}

/// Script source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Source lines.
    pub exec: Vec<String>,
    /// MIME type of the script.
    #[serde(rename = "type")]
    pub kind: String,
}
