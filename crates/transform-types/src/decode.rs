//! Document decoding
//!
//! Configuration documents are accepted as JSON or YAML. Tagged unions are
//! decoded in two passes: the document is buffered, its `type` field is
//! read on its own, and the buffered document is then decoded again into
//! the shape that tag selects.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Surface syntax of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// Error raised while decoding or encoding a configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentError {
    pub format: DocumentFormat,
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl DocumentError {
    fn from_json(err: &serde_json::Error, action: &str) -> Self {
        // serde_json reports line 0 for errors without a position.
        let line = err.line();
        let position = (line > 0).then(|| (line, err.column()));
        Self {
            format: DocumentFormat::Json,
            message: format!(
                "failed to {action} JSON document: {}",
                strip_position(&err.to_string(), position)
            ),
            line: position.map(|(line, _)| line),
            column: position.map(|(_, column)| column),
        }
    }

    fn from_yaml(err: &serde_yaml::Error, action: &str) -> Self {
        let position = err.location().map(|l| (l.line(), l.column()));
        Self {
            format: DocumentFormat::Yaml,
            message: format!(
                "failed to {action} YAML document: {}",
                strip_position(&err.to_string(), position)
            ),
            line: position.map(|(line, _)| line),
            column: position.map(|(_, column)| column),
        }
    }
}

/// Drop the trailing position both parsers append, it is reported separately.
fn strip_position(message: &str, position: Option<(usize, usize)>) -> &str {
    position
        .and_then(|(line, column)| {
            message.strip_suffix(&format!(" at line {line} column {column}"))
        })
        .unwrap_or(message)
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, " at line {line}, column {col}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DocumentError {}

/// Decode a JSON document
///
/// # Errors
///
/// Returns an error when the input is not valid JSON or does not match `T`.
pub fn from_json_str<T: DeserializeOwned>(input: &str) -> Result<T, DocumentError> {
    serde_json::from_str(input).map_err(|e| DocumentError::from_json(&e, "decode"))
}

/// Decode a JSON document from raw bytes
///
/// # Errors
///
/// Returns an error when the input is not valid JSON or does not match `T`.
pub fn from_json_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, DocumentError> {
    serde_json::from_slice(input).map_err(|e| DocumentError::from_json(&e, "decode"))
}

/// Decode a YAML document
///
/// # Errors
///
/// Returns an error when the input is not valid YAML or does not match `T`.
pub fn from_yaml_str<T: DeserializeOwned>(input: &str) -> Result<T, DocumentError> {
    serde_yaml::from_str(input).map_err(|e| DocumentError::from_yaml(&e, "decode"))
}

/// Decode a YAML document from raw bytes
///
/// # Errors
///
/// Returns an error when the input is not valid YAML or does not match `T`.
pub fn from_yaml_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, DocumentError> {
    serde_yaml::from_slice(input).map_err(|e| DocumentError::from_yaml(&e, "decode"))
}

/// Encode a value as pretty-printed JSON
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(value).map_err(|e| DocumentError::from_json(&e, "encode"))
}

/// Encode a value as YAML
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, DocumentError> {
    serde_yaml::to_string(value).map_err(|e| DocumentError::from_yaml(&e, "encode"))
}

#[derive(Deserialize)]
struct RawTag {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// A buffered document together with its discriminator tag.
///
/// Works for any self-describing format, so JSON and YAML share one decode
/// path per tagged union.
#[derive(Debug, Clone)]
pub struct TaggedDocument {
    /// Value of the `type` field, empty when the field is missing
    pub tag: String,
    document: Value,
}

impl TaggedDocument {
    /// Buffer the document and read out its `type` field only.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a mapping or `type` is not a string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Value::deserialize(deserializer)?;
        let raw = RawTag::deserialize(&document).map_err(de::Error::custom)?;
        Ok(Self {
            tag: raw.kind.unwrap_or_default(),
            document,
        })
    }

    /// Decode the buffered document into the shape selected by the tag.
    ///
    /// The buffer carries no source positions. A shape error (a field of the
    /// wrong type, say) keeps the field-level message, and the outer parser
    /// reports the position of the enclosing tagged document, not of the
    /// offending field.
    ///
    /// # Errors
    ///
    /// Returns an error when the document does not match `T`.
    pub fn into_shape<T: DeserializeOwned, E: de::Error>(self) -> Result<T, E> {
        serde_json::from_value(self.document).map_err(E::custom)
    }
}

/// Serialization counterpart of [`TaggedDocument`]: writes the `type`
/// field followed by the fields of the concrete shape.
#[derive(Debug, Serialize)]
pub struct Tagged<'a, K, T> {
    #[serde(rename = "type")]
    pub tag: K,
    #[serde(flatten)]
    pub inner: &'a T,
}

impl<'a, K, T> Tagged<'a, K, T> {
    pub fn new(tag: K, inner: &'a T) -> Self {
        Self { tag, inner }
    }
}
