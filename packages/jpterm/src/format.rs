//! Canonical serialization shared by the display and the final output.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value as JsonValue;

const INDENT: &[u8] = b"  ";

/// Serialize a value as indented JSON.
///
/// Two-space indentation, non-ASCII characters kept as-is, object keys in
/// insertion order.
pub fn canonical(value: &JsonValue) -> String {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}
