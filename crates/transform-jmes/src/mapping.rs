//! Field mapping tree
//!
//! Runtime form of a field mapping. Evaluation is a pure function of the
//! input value: every lookup goes through [`crate::search::search`].

use crate::search::{search, value_type_name};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};
use transform_types::IsZero;

/// Discriminator of a field mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMappingType {
    Field,
    Object,
}

impl FieldMappingType {
    /// Tag as written in configuration documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for FieldMappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldMappingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "field" => Ok(Self::Field),
            "object" => Ok(Self::Object),
            other => Err(Error::UnsupportedFieldMappingType(other.to_string())),
        }
    }
}

/// A node of the field mapping tree
#[derive(Debug, Clone)]
pub enum FieldMapping {
    /// Single path lookup with a default
    Entry(FieldMappingEntry),

    /// Single path lookup whose result must be a string
    EntryString(FieldMappingEntryString),

    /// Named collection of child mappings
    Object(FieldMappingObject),
}

impl FieldMapping {
    #[must_use]
    pub fn field_type(&self) -> FieldMappingType {
        match self {
            Self::Entry(_) | Self::EntryString(_) => FieldMappingType::Field,
            Self::Object(_) => FieldMappingType::Object,
        }
    }

    /// Evaluate the mapping against input data
    ///
    /// # Errors
    ///
    /// Returns an error when a path expression is malformed or a string entry
    /// resolves to a non-string value.
    pub fn evaluate(&self, data: &Value) -> Result<Value> {
        match self {
            Self::Entry(entry) => entry.evaluate(data),
            Self::EntryString(entry) => entry.evaluate(data),
            Self::Object(object) => object.evaluate(data),
        }
    }
}

impl IsZero for FieldMapping {
    fn is_zero(&self) -> bool {
        match self {
            Self::Entry(entry) => entry.is_zero(),
            Self::EntryString(entry) => entry.is_zero(),
            Self::Object(object) => object.is_zero(),
        }
    }
}

impl PartialEq for FieldMapping {
    fn eq(&self, other: &Self) -> bool {
        if self.field_type() != other.field_type() {
            return false;
        }

        match (self, other) {
            (Self::Entry(a), Self::Entry(b)) => a == b,
            (Self::EntryString(a), Self::EntryString(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<FieldMappingEntry> for FieldMapping {
    fn from(entry: FieldMappingEntry) -> Self {
        Self::Entry(entry)
    }
}

impl From<FieldMappingEntryString> for FieldMapping {
    fn from(entry: FieldMappingEntryString) -> Self {
        Self::EntryString(entry)
    }
}

impl From<FieldMappingObject> for FieldMapping {
    fn from(object: FieldMappingObject) -> Self {
        Self::Object(object)
    }
}

/// Resolve `path` against `data`.
///
/// An unset path finds nothing, so the entry falls back to its default. An
/// empty path selects `data` itself.
fn lookup(path: Option<&str>, data: &Value) -> Result<Value> {
    match path {
        None => Ok(Value::Null),
        Some("") => Ok(data.clone()),
        Some(path) => {
            trace!(path, "evaluating mapping entry");
            search(path, data)
        }
    }
}

/// Looks up a value with a JMESPath expression
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMappingEntry {
    /// JMESPath expression to find a value in the input data
    pub path: Option<String>,

    /// Value used when the lookup finds nothing
    pub default: Option<Value>,
}

impl FieldMappingEntry {
    /// Create an entry that looks up `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            default: None,
        }
    }

    /// Set the fallback value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Evaluate the entry, falling back to the default when the lookup
    /// yields null.
    ///
    /// # Errors
    ///
    /// Returns an error when the path expression is malformed.
    pub fn evaluate(&self, data: &Value) -> Result<Value> {
        let found = lookup(self.path.as_deref(), data)?;
        if !found.is_null() {
            return Ok(found);
        }

        Ok(self.default.clone().unwrap_or(Value::Null))
    }
}

impl IsZero for FieldMappingEntry {
    fn is_zero(&self) -> bool {
        self.path.is_none() && self.default.is_none()
    }
}

/// Looks up a string value with a JMESPath expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMappingEntryString {
    /// JMESPath expression to find a value in the input data
    pub path: Option<String>,

    /// Value used when the lookup finds nothing
    pub default: Option<String>,
}

impl FieldMappingEntryString {
    /// Create an entry that looks up `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            default: None,
        }
    }

    /// Set the fallback value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Evaluate the entry as a generic value
    ///
    /// # Errors
    ///
    /// See [`Self::evaluate_string`].
    pub fn evaluate(&self, data: &Value) -> Result<Value> {
        let found = self.evaluate_string(data)?;
        Ok(found.map_or(Value::Null, Value::String))
    }

    /// Evaluate the entry, requiring the resolved value to be a string
    ///
    /// # Errors
    ///
    /// Returns an error when the path expression is malformed or the
    /// resolved value is present but not a string.
    pub fn evaluate_string(&self, data: &Value) -> Result<Option<String>> {
        match lookup(self.path.as_deref(), data)? {
            Value::Null => Ok(self.default.clone()),
            Value::String(found) => Ok(Some(found)),
            other => Err(Error::MalformedEntry {
                expected: "string",
                found: value_type_name(&other),
            }),
        }
    }
}

impl IsZero for FieldMappingEntryString {
    fn is_zero(&self) -> bool {
        self.path.is_none() && self.default.is_none()
    }
}

/// Assembles a mapping from named child field mappings.
///
/// A property without a mapping (`None`) makes the whole object evaluate
/// to null rather than skipping that property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMappingObject {
    pub properties: BTreeMap<String, Option<FieldMapping>>,
}

impl FieldMappingObject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named child mapping
    #[must_use]
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        mapping: impl Into<FieldMapping>,
    ) -> Self {
        self.properties.insert(key.into(), Some(mapping.into()));
        self
    }

    /// Evaluate every property against the same input
    ///
    /// # Errors
    ///
    /// Returns the first property failure, wrapped with its key.
    pub fn evaluate(&self, data: &Value) -> Result<Value> {
        let mut result = Map::new();

        for (key, field) in &self.properties {
            let Some(field) = field else {
                debug!(key = %key, "object property has no mapping, object evaluates to null");
                return Ok(Value::Null);
            };

            let value = field
                .evaluate(data)
                .map_err(|err| Error::property(key.as_str(), err))?;
            result.insert(key.clone(), value);
        }

        Ok(Value::Object(result))
    }
}

impl IsZero for FieldMappingObject {
    fn is_zero(&self) -> bool {
        self.properties.is_empty()
    }
}
