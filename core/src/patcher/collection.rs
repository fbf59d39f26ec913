//! # Collection Field Strip
//!
//! Moves a request field (by default the app id) out of query strings, path
//! variables and JSON bodies of an existing collection, and into a header.
//!
//! Works on an untyped `serde_json::Value` so hand-edited collections with keys
//! we do not model survive the round trip.

use crate::error::AppResult;
use crate::json::{to_string_indented, INDENT_4};
use serde_json::{json, Map, Value};

/// What to strip and what to put in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStrip {
    /// Field name as used in queries and path variables (`appId`).
    pub field: String,
    /// Header carrying the value instead (`App-Id`).
    pub header_key: String,
    /// Header value (`{{appId}}`).
    pub header_value: String,
    /// Only requests whose raw URL contains this are rewritten.
    pub scope: String,
    /// POST requests whose raw URL contains all of these always get the header.
    pub header_on_post: Vec<String>,
}

impl Default for FieldStrip {
    fn default() -> Self {
        Self {
            field: "appId".to_string(),
            header_key: "App-Id".to_string(),
            header_value: "{{appId}}".to_string(),
            scope: "/auth/api/".to_string(),
            header_on_post: vec!["/auth/api/Auth/users/".to_string(), "/apps".to_string()],
        }
    }
}

/// Counters reported after a patch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StripStats {
    /// Requests that received (or updated) the header.
    pub headers: usize,
    /// Bodies that lost the field.
    pub bodies: usize,
}

/// Returns the camelCase and PascalCase spellings of `field`.
pub fn field_variants(field: &str) -> Vec<String> {
    let mut chars = field.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };
    let rest: String = chars.collect();
    let lower = format!("{}{}", first.to_lowercase(), rest);
    let upper = format!("{}{}", first.to_uppercase(), rest);
    if lower == upper {
        vec![lower]
    } else {
        vec![lower, upper]
    }
}

fn raw_url(request: &Map<String, Value>) -> String {
    request
        .get("url")
        .and_then(|u| u.get("raw"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn has_keyed_entry(list: Option<&Value>, key: &str) -> bool {
    list.and_then(Value::as_array)
        .is_some_and(|items| items.iter().any(|q| q.get("key").and_then(Value::as_str) == Some(key)))
}

/// Sets a header, matching existing keys case-insensitively.
pub fn ensure_header(request: &mut Map<String, Value>, key: &str, value: &str) {
    let headers = request
        .entry("header")
        .or_insert_with(|| Value::Array(Vec::new()));
    if !headers.is_array() {
        *headers = Value::Array(Vec::new());
    }
    let Some(list) = headers.as_array_mut() else {
        return;
    };

    for header in list.iter_mut() {
        let matches = header
            .get("key")
            .and_then(Value::as_str)
            .is_some_and(|k| k.eq_ignore_ascii_case(key));
        if matches {
            header["value"] = json!(value);
            return;
        }
    }

    list.push(json!({ "key": key, "value": value, "type": "text" }));
}

/// Drops a query parameter from `url.query` and from the raw query string.
pub fn remove_query_param(request: &mut Map<String, Value>, param: &str) {
    let Some(url) = request.get_mut("url").and_then(Value::as_object_mut) else {
        return;
    };

    if let Some(query) = url.get_mut("query").and_then(Value::as_array_mut) {
        query.retain(|q| q.get("key").and_then(Value::as_str) != Some(param));
    }

    let raw = url.get("raw").and_then(Value::as_str).unwrap_or_default();
    if let Some((base, query)) = raw.split_once('?') {
        let needle = format!("{}=", param);
        let kept: Vec<&str> = query.split('&').filter(|p| !p.starts_with(&needle)).collect();
        let rebuilt = if kept.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, kept.join("&"))
        };
        url.insert("raw".to_string(), json!(rebuilt));
    }
}

/// Drops a `:name` path variable from `variable`, `path` and `raw`.
pub fn remove_path_variable(request: &mut Map<String, Value>, name: &str) {
    let Some(url) = request.get_mut("url").and_then(Value::as_object_mut) else {
        return;
    };

    if let Some(vars) = url.get_mut("variable").and_then(Value::as_array_mut) {
        vars.retain(|v| v.get("key").and_then(Value::as_str) != Some(name));
    }

    let segment = format!(":{}", name);
    if let Some(path) = url.get_mut("path").and_then(Value::as_array_mut) {
        path.retain(|p| p.as_str() != Some(segment.as_str()));
    }

    if let Some(raw) = url.get("raw").and_then(Value::as_str) {
        let stripped = raw.replace(&format!("/{}", segment), "");
        url.insert("raw".to_string(), json!(stripped));
    }
}

/// Rewrites one request in place. Returns whether the header was ensured.
fn patch_request(request: &mut Map<String, Value>, method: &str, cfg: &FieldStrip) -> bool {
    let raw = raw_url(request);
    let mut header = false;

    if raw.contains(&cfg.scope) {
        let url = request.get("url");
        let in_query = has_keyed_entry(url.and_then(|u| u.get("query")), &cfg.field);
        let in_path = has_keyed_entry(url.and_then(|u| u.get("variable")), &cfg.field)
            || raw.contains(&format!("/:{}", cfg.field));

        if in_query {
            remove_query_param(request, &cfg.field);
            header = true;
        }
        if in_path {
            remove_path_variable(request, &cfg.field);
            header = true;
        }
    }

    let raw = raw_url(request);
    if method == "POST"
        && !cfg.header_on_post.is_empty()
        && cfg.header_on_post.iter().all(|frag| raw.contains(frag))
    {
        header = true;
    }

    if header {
        ensure_header(request, &cfg.header_key, &cfg.header_value);
    }
    header
}

fn patch_requests(item: &mut Value, cfg: &FieldStrip, stats: &mut StripStats) {
    if let Some(children) = item.get_mut("item").and_then(Value::as_array_mut) {
        for child in children {
            patch_requests(child, cfg, stats);
        }
        return;
    }

    let Some(request) = item.get_mut("request").and_then(Value::as_object_mut) else {
        return;
    };
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if patch_request(request, &method, cfg) {
        stats.headers += 1;
    }
}

/// Removes `keys` from a raw JSON body. Returns whether the body changed.
///
/// Bodies that are not raw mode, do not mention a key, or do not parse as a
/// JSON object are left alone.
pub fn clean_raw_body(body: &mut Value, keys: &[String]) -> AppResult<bool> {
    let Some(body) = body.as_object_mut() else {
        return Ok(false);
    };
    if body.get("mode").and_then(Value::as_str) != Some("raw") {
        return Ok(false);
    }
    let Some(raw) = body.get("raw").and_then(Value::as_str) else {
        return Ok(false);
    };
    if !keys.iter().any(|k| raw.contains(&format!("\"{}\"", k))) {
        return Ok(false);
    }

    let Ok(Value::Object(mut payload)) = serde_json::from_str::<Value>(raw) else {
        return Ok(false);
    };

    let mut changed = false;
    for key in keys {
        changed |= payload.shift_remove(key).is_some();
    }
    if changed {
        let rewritten = to_string_indented(&payload, INDENT_4)?;
        body.insert("raw".to_string(), Value::String(rewritten));
    }
    Ok(changed)
}

fn strip_bodies(item: &mut Value, keys: &[String], stats: &mut StripStats) -> AppResult<()> {
    if let Some(children) = item.get_mut("item").and_then(Value::as_array_mut) {
        for child in children {
            strip_bodies(child, keys, stats)?;
        }
    }

    if let Some(body) = item.get_mut("request").and_then(|r| r.get_mut("body")) {
        if clean_raw_body(body, keys)? {
            stats.bodies += 1;
        }
    }

    if let Some(responses) = item.get_mut("response").and_then(Value::as_array_mut) {
        for response in responses {
            let body = response
                .get_mut("originalRequest")
                .and_then(|r| r.get_mut("body"));
            if let Some(body) = body {
                if clean_raw_body(body, keys)? {
                    stats.bodies += 1;
                }
            }
        }
    }

    Ok(())
}

/// Applies the field strip to a whole collection document.
///
/// First pass: headers, query parameters and path variables of in-scope
/// requests. Second pass: every raw JSON body, including saved example
/// requests, loses the field in both spellings.
pub fn strip_field(document: &mut Value, cfg: &FieldStrip) -> AppResult<StripStats> {
    let mut stats = StripStats::default();
    patch_requests(document, cfg, &mut stats);
    strip_bodies(document, &field_variants(&cfg.field), &mut stats)?;
    Ok(stats)
}
