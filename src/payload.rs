//! Conversion collaborators for JSON, XML, object, and error payloads.
//!
//! Every function returns a printable string: malformed input is replaced by
//! a fixed sentinel and logging proceeds with the sentinel as the message.

use std::error::Error;
use std::io::ErrorKind;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const JSON_INDENT: &[u8] = b"    ";

/// Pretty-prints a JSON document with four-space indentation.
///
/// Content that is empty, does not open with `{` or `[`, or fails to parse
/// yields the matching sentinel instead.
pub fn pretty_json(json: &str) -> String {
    if json.is_empty() {
        return "Empty/Null json content".to_string();
    }
    let trimmed = json.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return "Invalid json content".to_string();
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => {
            indented_json(&value).unwrap_or_else(|_| "Invalid json content".to_string())
        }
        Err(_) => "Invalid json content".to_string(),
    }
}

/// Pretty-prints an XML document with indentation, or the matching sentinel
/// for empty or malformed content.
pub fn pretty_xml(xml: &str) -> String {
    if xml.is_empty() {
        return "Empty/Null xml content".to_string();
    }
    let root = match xmltree::Element::parse(xml.as_bytes()) {
        Ok(root) => root,
        Err(_) => return "Invalid xml content".to_string(),
    };
    let mut out = Vec::new();
    let config = xmltree::EmitterConfig::new().perform_indent(true);
    match root.write_with_config(&mut out, config) {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| "Invalid xml content".to_string()),
        Err(_) => "Invalid xml content".to_string(),
    }
}

/// Renders any serializable value as four-space-indented JSON.
///
/// A value serializing to JSON `null` yields `"Null object content"`, and a
/// serialization failure yields `"Invalid object content"`.
pub fn pretty_object<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Null) => "Null object content".to_string(),
        Ok(value) => {
            indented_json(&value).unwrap_or_else(|_| "Invalid object content".to_string())
        }
        Err(_) => "Invalid object content".to_string(),
    }
}

/// Renders an error and its source chain, one `caused by:` line per link.
///
/// Returns an empty string when any link in the chain is a host- or
/// network-unreachable I/O error, so transient connectivity loss does not
/// flood the output.
pub fn error_text(error: &(dyn Error + 'static)) -> String {
    let mut cursor: Option<&(dyn Error + 'static)> = Some(error);
    while let Some(err) = cursor {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io_err.kind(),
                ErrorKind::HostUnreachable | ErrorKind::NetworkUnreachable
            ) {
                return String::new();
            }
        }
        cursor = err.source();
    }

    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(err) = source {
        text.push_str("\ncaused by: ");
        text.push_str(&err.to_string());
        source = err.source();
    }
    text
}

fn indented_json(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(out).unwrap_or_default())
}
