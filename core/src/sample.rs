#![deny(missing_docs)]

//! # Sample Values
//!
//! Maps a declared C# type and a parameter name to an example JSON value.
//!
//! Classification is a fixed, ordered rule table: the first rule whose type
//! fragment and (optional) name fragment both match decides the value. Only the
//! outer type is inspected, so `List<string>` is a list rather than a string.

use serde_json::{json, Map, Value};

/// Fixed id used for parameters that look like an application id.
pub const DEMO_APP_ID: &str = "33333333-3333-3333-3333-333333333330";

/// Fixed id used for parameters that look like a user id.
pub const NIL_USER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Source of the values that legitimately differ between runs.
pub trait SampleSource {
    /// A freshly generated UUID string.
    fn uuid(&self) -> String;
    /// The current time as an ISO-8601 string.
    fn timestamp(&self) -> String;
}

/// `SampleSource` backed by the system RNG and the local clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSource;

impl SampleSource for SystemSource {
    fn uuid(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn timestamp(&self) -> String {
        chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string()
    }
}

/// The value a matching rule produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    /// A fixed string literal.
    Text(&'static str),
    /// A fixed integer.
    Integer(i64),
    /// A fixed decimal.
    Decimal(f64),
    /// A fixed boolean.
    Boolean(bool),
    /// A fresh UUID from the `SampleSource`.
    FreshUuid,
    /// The current time from the `SampleSource`.
    Now,
    /// `"sample <Name>"` using the parameter name as declared.
    NamedSample,
    /// `{}`
    EmptyObject,
    /// `[]`
    EmptyArray,
}

impl SampleValue {
    /// Materialises the value for a parameter.
    pub fn produce(&self, name: &str, source: &dyn SampleSource) -> Value {
        match self {
            SampleValue::Text(s) => json!(s),
            SampleValue::Integer(i) => json!(i),
            SampleValue::Decimal(d) => json!(d),
            SampleValue::Boolean(b) => json!(b),
            SampleValue::FreshUuid => json!(source.uuid()),
            SampleValue::Now => json!(source.timestamp()),
            SampleValue::NamedSample => json!(format!("sample {}", name)),
            SampleValue::EmptyObject => Value::Object(Map::new()),
            SampleValue::EmptyArray => Value::Array(Vec::new()),
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct SampleRule {
    /// The rule applies when the normalized type contains any of these.
    pub type_fragments: &'static [&'static str],
    /// Additionally requires the lower-cased name to contain this.
    pub name_fragment: Option<&'static str>,
    /// What to emit on match.
    pub value: SampleValue,
}

impl SampleRule {
    const fn of(types: &'static [&'static str], value: SampleValue) -> Self {
        Self {
            type_fragments: types,
            name_fragment: None,
            value,
        }
    }

    const fn named(types: &'static [&'static str], name: &'static str, value: SampleValue) -> Self {
        Self {
            type_fragments: types,
            name_fragment: Some(name),
            value,
        }
    }

    /// Whether this rule applies to an already normalized type and lower-cased name.
    pub fn matches(&self, normalized_type: &str, lower_name: &str) -> bool {
        self.type_fragments
            .iter()
            .any(|frag| normalized_type.contains(frag))
            && self
                .name_fragment
                .is_none_or(|frag| lower_name.contains(frag))
    }
}

/// The ordered rule table. Order is significant: first match wins.
pub static SAMPLE_RULES: &[SampleRule] = &[
    SampleRule::named(&["guid"], "app", SampleValue::Text(DEMO_APP_ID)),
    SampleRule::named(&["guid"], "user", SampleValue::Text(NIL_USER_ID)),
    SampleRule::of(&["guid"], SampleValue::FreshUuid),
    SampleRule::of(&["int", "long"], SampleValue::Integer(0)),
    SampleRule::of(&["bool"], SampleValue::Boolean(true)),
    SampleRule::of(&["datetime"], SampleValue::Now),
    SampleRule::named(&["string"], "email", SampleValue::Text("test@example.com")),
    SampleRule::named(&["string"], "password", SampleValue::Text("Password123!")),
    SampleRule::named(&["string"], "phone", SampleValue::Text("+1234567890")),
    SampleRule::named(&["string"], "url", SampleValue::Text("https://example.com")),
    SampleRule::named(&["string"], "json", SampleValue::Text("{}")),
    SampleRule::of(&["string"], SampleValue::NamedSample),
    SampleRule::of(&["decimal", "double"], SampleValue::Decimal(10.99)),
    SampleRule::of(&["dictionary"], SampleValue::EmptyObject),
    SampleRule::of(&["list", "ienumerable", "[]"], SampleValue::EmptyArray),
];

/// Lower-cases a declared type, drops nullability markers and generic arguments.
///
/// `List<string>?` becomes `list`, `Guid?` becomes `guid`.
pub fn normalize_type(declared: &str) -> String {
    let lower = declared.to_lowercase().replace('?', "");
    match lower.split_once('<') {
        Some((head, _)) => head.trim().to_string(),
        None => lower.trim().to_string(),
    }
}

/// Returns the first rule matching `declared_type` / `name`, if any.
pub fn classify(declared_type: &str, name: &str) -> Option<&'static SampleRule> {
    let ty = normalize_type(declared_type);
    let name = name.to_lowercase();
    SAMPLE_RULES.iter().find(|rule| rule.matches(&ty, &name))
}

/// Synthesizes an example value, or `None` when no rule applies.
pub fn generate_sample_value(
    declared_type: &str,
    name: &str,
    source: &dyn SampleSource,
) -> Option<Value> {
    classify(declared_type, name).map(|rule| rule.value.produce(name, source))
}
