//! Field mapping configuration
//!
//! Serializable form of the field mapping tree. Documents carry a `type`
//! tag (`field` or `object`); the rest of the document is decoded into the
//! shape that tag selects. Evaluating a config resolves environment-aware
//! defaults and produces the runtime [`FieldMapping`].

use crate::mapping::{
    FieldMapping, FieldMappingEntry, FieldMappingEntryString, FieldMappingObject, FieldMappingType,
};
use crate::{Error, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use transform_types::decode::{self, Tagged, TaggedDocument};
use transform_types::{EnvAny, EnvString, GetEnvFn, IsZero, get_os_env};

/// A field mapping config of any shape
#[derive(Debug, Clone)]
pub enum FieldMappingConfig {
    Entry(FieldMappingEntryConfig),
    EntryString(FieldMappingEntryStringConfig),
    Object(FieldMappingObjectConfig),
}

impl FieldMappingConfig {
    #[must_use]
    pub fn field_type(&self) -> FieldMappingType {
        match self {
            Self::Entry(_) | Self::EntryString(_) => FieldMappingType::Field,
            Self::Object(_) => FieldMappingType::Object,
        }
    }

    /// Convert the config to a runtime field mapping
    ///
    /// # Errors
    ///
    /// Returns an error when a required field is missing or an environment
    /// lookup fails.
    pub fn evaluate(&self, get_env: &GetEnvFn) -> Result<FieldMapping> {
        match self {
            Self::Entry(config) => config.evaluate(get_env),
            Self::EntryString(config) => config.evaluate(get_env),
            Self::Object(config) => config.evaluate(get_env),
        }
    }

    /// Convert the config using the process environment
    ///
    /// # Errors
    ///
    /// See [`Self::evaluate`].
    pub fn evaluate_env(&self) -> Result<FieldMapping> {
        self.evaluate(&get_os_env)
    }

    /// Decode a JSON document
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an unsupported `type` tag.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(decode::from_json_str(input)?)
    }

    /// Decode a JSON document from raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an unsupported `type` tag.
    pub fn from_json_slice(input: &[u8]) -> Result<Self> {
        Ok(decode::from_json_slice(input)?)
    }

    /// Decode a YAML document
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML or an unsupported `type` tag.
    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(decode::from_yaml_str(input)?)
    }

    /// Decode a YAML document from raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML or an unsupported `type` tag.
    pub fn from_yaml_slice(input: &[u8]) -> Result<Self> {
        Ok(decode::from_yaml_slice(input)?)
    }

    /// Encode as JSON
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(decode::to_json_string(self)?)
    }

    /// Encode as YAML
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(decode::to_yaml_string(self)?)
    }
}

impl IsZero for FieldMappingConfig {
    fn is_zero(&self) -> bool {
        match self {
            Self::Entry(config) => config.is_zero(),
            Self::EntryString(config) => config.is_zero(),
            Self::Object(config) => config.is_zero(),
        }
    }
}

impl PartialEq for FieldMappingConfig {
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

impl<'de> Deserialize<'de> for FieldMappingConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tagged = TaggedDocument::deserialize(deserializer)?;
        let kind = tagged
            .tag
            .parse::<FieldMappingType>()
            .map_err(de::Error::custom)?;

        match kind {
            FieldMappingType::Field => tagged.into_shape().map(Self::Entry),
            FieldMappingType::Object => tagged.into_shape().map(Self::Object),
        }
    }
}

impl Serialize for FieldMappingConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let tag = self.field_type();
        match self {
            Self::Entry(config) => Tagged::new(tag, config).serialize(serializer),
            Self::EntryString(config) => Tagged::new(tag, config).serialize(serializer),
            Self::Object(config) => Tagged::new(tag, config).serialize(serializer),
        }
    }
}

impl From<FieldMappingEntryConfig> for FieldMappingConfig {
    fn from(config: FieldMappingEntryConfig) -> Self {
        Self::Entry(config)
    }
}

impl From<FieldMappingEntryStringConfig> for FieldMappingConfig {
    fn from(config: FieldMappingEntryStringConfig) -> Self {
        Self::EntryString(config)
    }
}

impl From<FieldMappingObjectConfig> for FieldMappingConfig {
    fn from(config: FieldMappingObjectConfig) -> Self {
        Self::Object(config)
    }
}

/// Entry config to look up a value with a JMESPath expression
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMappingEntryConfig {
    /// JMESPath expression to find a value in the input data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Value used when the lookup finds nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<EnvAny>,
}

impl FieldMappingEntryConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: EnvAny) -> Self {
        self.default = Some(default);
        self
    }

    /// Convert to a runtime field mapping
    ///
    /// # Errors
    ///
    /// See [`Self::evaluate_entry`].
    pub fn evaluate(&self, get_env: &GetEnvFn) -> Result<FieldMapping> {
        self.evaluate_entry(get_env).map(FieldMapping::Entry)
    }

    /// Convert to a runtime entry, resolving the default
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryRequired`] when neither path nor default is set,
    /// or the environment lookup error of the default.
    pub fn evaluate_entry(&self, get_env: &GetEnvFn) -> Result<FieldMappingEntry> {
        if self.is_zero() {
            return Err(Error::EntryRequired);
        }

        let default = match &self.default {
            Some(default) => Some(default.get_custom(get_env)?).filter(|v| !v.is_null()),
            None => None,
        };

        Ok(FieldMappingEntry {
            path: self.path.clone(),
            default,
        })
    }

    /// Convert to a runtime entry using the process environment
    ///
    /// # Errors
    ///
    /// See [`Self::evaluate_entry`].
    pub fn evaluate_entry_env(&self) -> Result<FieldMappingEntry> {
        self.evaluate_entry(&get_os_env)
    }
}

impl IsZero for FieldMappingEntryConfig {
    fn is_zero(&self) -> bool {
        self.path.is_none() && self.default.is_none()
    }
}

/// Entry config to look up a string value with a JMESPath expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMappingEntryStringConfig {
    /// JMESPath expression to find a value in the input data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Value used when the lookup finds nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<EnvString>,
}

impl FieldMappingEntryStringConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: EnvString) -> Self {
        self.default = Some(default);
        self
    }

    /// Convert to a runtime field mapping
    ///
    /// # Errors
    ///
    /// See [`Self::evaluate_string`].
    pub fn evaluate(&self, get_env: &GetEnvFn) -> Result<FieldMapping> {
        self.evaluate_string(get_env).map(FieldMapping::EntryString)
    }

    /// Convert to a runtime string entry, resolving the default
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryRequired`] when neither path nor default is set,
    /// or the environment lookup error of the default.
    pub fn evaluate_string(&self, get_env: &GetEnvFn) -> Result<FieldMappingEntryString> {
        if self.is_zero() {
            return Err(Error::EntryRequired);
        }

        let default = match &self.default {
            Some(default) => default.get_custom(get_env)?,
            None => None,
        };

        Ok(FieldMappingEntryString {
            path: self.path.clone(),
            default,
        })
    }
}

impl IsZero for FieldMappingEntryStringConfig {
    fn is_zero(&self) -> bool {
        self.path.is_none() && self.default.is_none()
    }
}

/// Config for object mapping.
///
/// `properties` being absent is distinct from being empty: an absent map
/// fails evaluation, an empty one yields an empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMappingObjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Option<FieldMappingConfig>>>,
}

impl FieldMappingObjectConfig {
    /// Create an object config with an empty property map
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: Some(BTreeMap::new()),
        }
    }

    /// Add a named child config
    #[must_use]
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        config: impl Into<FieldMappingConfig>,
    ) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), Some(config.into()));
        self
    }

    /// Convert to a runtime object mapping, failing fast on the first child
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectRequired`] when `properties` is absent, or the
    /// first child failure wrapped with its key.
    pub fn evaluate(&self, get_env: &GetEnvFn) -> Result<FieldMapping> {
        let Some(properties) = &self.properties else {
            return Err(Error::ObjectRequired);
        };

        let mut result = FieldMappingObject::new();

        for (key, field_config) in properties {
            let Some(field_config) = field_config else {
                return Err(Error::property(key.as_str(), Error::EntryRequired));
            };

            let field = field_config
                .evaluate(get_env)
                .map_err(|err| Error::property(key.as_str(), err))?;
            result.properties.insert(key.clone(), Some(field));
        }

        Ok(FieldMapping::Object(result))
    }
}

impl IsZero for FieldMappingObjectConfig {
    fn is_zero(&self) -> bool {
        self.properties.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn no_env(_: &str) -> transform_types::Result<String> {
        Ok(String::new())
    }

    #[test]
    fn test_decode_field() {
        let config = FieldMappingConfig::from_json(r#"{"type": "field", "path": "name"}"#).unwrap();
        assert_eq!(config, FieldMappingEntryConfig::new("name").into());
    }

    #[test]
    fn test_decode_field_with_literal_default() {
        let config = FieldMappingConfig::from_json(
            r#"{"type": "field", "path": "name", "default": "anonymous"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            FieldMappingEntryConfig::new("name")
                .with_default(EnvAny::new("anonymous"))
                .into()
        );
    }

    #[test]
    fn test_decode_object_yaml() {
        let yaml = r"
type: object
properties:
  id:
    type: field
    path: user.id
  meta:
    type: object
    properties:
      source:
        type: field
        default:
          value: api
          env: SOURCE
";
        let config = FieldMappingConfig::from_yaml(yaml).unwrap();
        let expected = FieldMappingObjectConfig::new()
            .with_property("id", FieldMappingEntryConfig::new("user.id"))
            .with_property(
                "meta",
                FieldMappingObjectConfig::new().with_property(
                    "source",
                    FieldMappingEntryConfig::default()
                        .with_default(EnvAny::new("api").with_env("SOURCE")),
                ),
            );
        assert_eq!(config, expected.into());
    }

    #[test]
    fn test_default_only_entry_yields_default() {
        let config = FieldMappingConfig::from_json(
            r#"{"type": "object", "properties": {
                "name": {"type": "field", "path": "name"},
                "source": {"type": "field", "default": "api"}
            }}"#,
        )
        .unwrap();
        let mapping = config.evaluate(&no_env).unwrap();
        assert_eq!(
            mapping.evaluate(&json!({"name": "John"})).unwrap(),
            json!({"name": "John", "source": "api"})
        );
    }

    #[test]
    fn test_decode_shape_error_keeps_field_message() {
        for err in [
            FieldMappingConfig::from_yaml("type: field\npath: [1]\n").unwrap_err(),
            FieldMappingConfig::from_json(r#"{"type": "field", "path": [1]}"#).unwrap_err(),
        ] {
            let message = err.to_string();
            assert!(message.starts_with("failed to decode"), "{message}");
            assert!(
                message.contains("invalid type: sequence, expected a string"),
                "{message}"
            );
        }
    }

    #[test]
    fn test_decode_unsupported_type() {
        let err = FieldMappingConfig::from_json(r#"{"type": "array", "path": "x"}"#).unwrap_err();
        assert!(
            err.to_string()
                .contains("unsupported field mapping type: array")
        );

        let err = FieldMappingConfig::from_yaml("type: list\n").unwrap_err();
        assert!(
            err.to_string()
                .contains("unsupported field mapping type: list")
        );
    }

    #[test]
    fn test_decode_missing_type() {
        let err = FieldMappingConfig::from_json(r#"{"path": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("unsupported field mapping type: "));
    }

    #[test]
    fn test_decode_distinguishes_absent_and_empty_properties() {
        let absent = FieldMappingConfig::from_json(r#"{"type": "object"}"#).unwrap();
        let empty =
            FieldMappingConfig::from_json(r#"{"type": "object", "properties": {}}"#).unwrap();
        assert!(absent.is_zero());
        assert!(!empty.is_zero());
        assert_ne!(absent, empty);
    }

    #[test]
    fn test_encode_round_trip() {
        let config: FieldMappingConfig = FieldMappingObjectConfig::new()
            .with_property(
                "a",
                FieldMappingEntryConfig::new("x").with_default(EnvAny::new(1)),
            )
            .with_property("b", FieldMappingObjectConfig::new())
            .into();

        let json = config.to_json().unwrap();
        assert_eq!(FieldMappingConfig::from_json(&json).unwrap(), config);

        let yaml = config.to_yaml().unwrap();
        assert_eq!(FieldMappingConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_equality_ignores_key_order() {
        let a = FieldMappingConfig::from_json(
            r#"{"type": "object", "properties": {"x": {"type": "field", "path": "x"}, "y": {"type": "field", "path": "y"}}}"#,
        )
        .unwrap();
        let b = FieldMappingConfig::from_json(
            r#"{"properties": {"y": {"path": "y", "type": "field"}, "x": {"type": "field", "path": "x"}}, "type": "object"}"#,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_different_types() {
        let entry: FieldMappingConfig = FieldMappingEntryConfig::new("x").into();
        let string_entry: FieldMappingConfig = FieldMappingEntryStringConfig::new("x").into();
        let object: FieldMappingConfig = FieldMappingObjectConfig::new().into();
        assert_ne!(entry, object);
        assert_ne!(entry, string_entry);
    }

    #[test]
    fn test_evaluate_entry_requires_content() {
        let err = FieldMappingEntryConfig::default()
            .evaluate(&no_env)
            .unwrap_err();
        assert_eq!(err.to_string(), "field mapping entry must not be empty");
    }

    #[test]
    fn test_evaluate_entry_resolves_env_default() {
        let env = |name: &str| -> transform_types::Result<String> {
            Ok(if name == "LIMIT" {
                "25".to_string()
            } else {
                String::new()
            })
        };
        let entry = FieldMappingEntryConfig::new("limit")
            .with_default(EnvAny::new(10).with_env("LIMIT"))
            .evaluate_entry(&env)
            .unwrap();
        assert_eq!(entry.default, Some(json!(25)));

        let entry = FieldMappingEntryConfig::new("limit")
            .with_default(EnvAny::new(10).with_env("OTHER"))
            .evaluate_entry(&env)
            .unwrap();
        assert_eq!(entry.default, Some(json!(10)));
    }

    #[test]
    fn test_evaluate_entry_propagates_env_error() {
        let env = |name: &str| -> transform_types::Result<String> {
            Err(transform_types::Error::env(name, "denied"))
        };
        let err = FieldMappingEntryConfig::default()
            .with_default(EnvAny::from_env("SECRET"))
            .evaluate(&env)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Types(transform_types::Error::Env { .. })
        ));
    }

    #[test]
    fn test_evaluate_object_requires_properties() {
        let err = FieldMappingObjectConfig::default()
            .evaluate(&no_env)
            .unwrap_err();
        assert_eq!(err.to_string(), "field mapping object must not be null");

        let mapping = FieldMappingObjectConfig::new().evaluate(&no_env).unwrap();
        assert_eq!(mapping.evaluate(&json!({"a": 1})).unwrap(), json!({}));
    }

    #[test]
    fn test_evaluate_object_rejects_absent_child() {
        let config = FieldMappingConfig::from_json(
            r#"{"type": "object", "properties": {"name": null}}"#,
        )
        .unwrap();
        let err = config.evaluate(&no_env).unwrap_err();
        assert_eq!(
            err.to_string(),
            "name: field mapping entry must not be empty"
        );
    }

    #[test]
    fn test_evaluate_object_wraps_child_error_with_key() {
        let config: FieldMappingConfig = FieldMappingObjectConfig::new()
            .with_property(
                "user",
                FieldMappingObjectConfig::new()
                    .with_property("id", FieldMappingEntryConfig::default()),
            )
            .into();
        let err = config.evaluate(&no_env).unwrap_err();
        assert_eq!(
            err.to_string(),
            "user: id: field mapping entry must not be empty"
        );
    }

    #[test]
    fn test_decode_then_evaluate_projection() {
        let config =
            FieldMappingConfig::from_json(r#"{"type": "field", "path": "users[*].name"}"#).unwrap();
        let mapping = config.evaluate(&no_env).unwrap();
        let data = json!({"users": [{"name": "Alice"}, {"name": "Bob"}]});
        assert_eq!(mapping.evaluate(&data).unwrap(), json!(["Alice", "Bob"]));
    }

    #[test]
    fn test_evaluate_string_config() {
        let entry = FieldMappingEntryStringConfig::new("name")
            .with_default(EnvString::new("anon"))
            .evaluate_string(&no_env)
            .unwrap();
        assert_eq!(entry.default.as_deref(), Some("anon"));
        assert_eq!(
            entry.evaluate(&json!({})).unwrap(),
            Value::String("anon".to_string())
        );

        let err = FieldMappingEntryStringConfig::default()
            .evaluate(&no_env)
            .unwrap_err();
        assert!(matches!(err, Error::EntryRequired));
    }

    #[test]
    fn test_string_config_serializes_as_field() {
        let config: FieldMappingConfig = FieldMappingEntryStringConfig::new("name").into();
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"type": "field", "path": "name"})
        );
    }
}
