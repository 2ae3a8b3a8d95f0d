//! Content codec
//!
//! Converts between raw spec text (JSON or YAML) and a structured
//! document, detecting the encoding as a side effect. The parse priority
//! is fixed: structured passthrough, then JSON, then YAML; first success
//! wins. Serialization honors the encoding detected at parse time.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::EditorProfile;

/// Textual serialization of an open document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Encoding {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("serialized document was not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Parse raw text as JSON first, then YAML. Returns the structured
/// document and the encoding that succeeded, or `None` when the text is
/// neither.
pub fn parse_text(text: &str) -> Option<(Value, Encoding)> {
    if let Ok(doc) = serde_json::from_str::<Value>(text) {
        return Some((doc, Encoding::Json));
    }
    if let Ok(doc) = serde_yaml::from_str::<Value>(text) {
        return Some((doc, Encoding::Yaml));
    }
    None
}

/// Parse an envelope payload. An already-structured value passes through
/// (and counts as JSON); string payloads go through [`parse_text`].
pub fn parse_payload(data: &Value) -> Option<(Value, Encoding)> {
    match data {
        Value::String(text) => parse_text(text),
        Value::Null => None,
        structured => Some((structured.clone(), Encoding::Json)),
    }
}

/// Serialize a structured document back to text in the given encoding.
///
/// JSON is pretty-printed with a 4-space indent. YAML goes through the
/// emitter's fixed style; plain values never produce anchors or aliases.
pub fn serialize(doc: &Value, encoding: Encoding) -> Result<String, CodecError> {
    match encoding {
        Encoding::Json => to_pretty_json(doc),
        Encoding::Yaml => Ok(serde_yaml::to_string(doc)?),
    }
}

/// Pretty-print a document as JSON with a 4-space indent, the format the
/// generator endpoint expects regardless of the file's own encoding.
pub fn to_pretty_json(doc: &Value) -> Result<String, CodecError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Pick the editing profile for a parsed document. The AsyncAPI marker
/// field wins; everything else edits as OpenAPI.
pub fn sniff_profile(doc: &Value) -> EditorProfile {
    if doc.get("asyncapi").is_some() {
        EditorProfile::AsyncApi
    } else {
        EditorProfile::OpenApi
    }
}
