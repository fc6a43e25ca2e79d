//! Canonical JSON rendering for JSON fixtures.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Parses JSON bytes into a value.
pub fn parse(bytes: &[u8]) -> serde_json::Result<Value> {
    serde_json::from_slice(bytes)
}

/// Renders a value with sorted object keys and tab indentation.
pub fn render(value: &Value) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Reformats a JSON document so semantically equal inputs produce the same
/// text.
///
/// # Examples
///
/// ```
/// use golden::json::canonicalize;
///
/// let a = canonicalize(r#"{"b":1, "a":[true,null]}"#).unwrap();
/// let b = canonicalize("{\n  \"a\": [true, null],\n  \"b\": 1\n}").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn canonicalize(input: &str) -> serde_json::Result<String> {
    render(&parse(input.as_bytes())?)
}
