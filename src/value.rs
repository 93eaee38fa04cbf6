use std::collections::BTreeMap;

/// A dynamic attribute value as it moves through the resolution engine.
pub type AttrValue = serde_json::Value;

/// An ordered attribute-name to value map.
///
/// `BTreeMap` keeps iteration deterministic, so resolution output and error
/// messages are stable across runs.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// Short human-readable name for a value's shape, used in error messages.
pub(crate) fn kind(value: &AttrValue) -> &'static str {
    match value {
        AttrValue::Null => "null",
        AttrValue::Bool(_) => "bool",
        AttrValue::Number(_) => "number",
        AttrValue::String(_) => "string",
        AttrValue::Array(_) => "array",
        AttrValue::Object(_) => "object",
    }
}

/// Converts an `AttrMap` into the object form serde_json deserializes from.
pub(crate) fn to_object(attrs: AttrMap) -> serde_json::Map<String, AttrValue> {
    attrs.into_iter().collect()
}

/// Trims a fully-qualified type name down to its final path segment.
pub(crate) fn short_name(name: &'static str) -> &'static str {
    name.rsplit("::").next().unwrap_or(name)
}
