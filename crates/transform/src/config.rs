//! Transformer configuration
//!
//! Top-level tagged union of a configuration document. The `type` tag
//! selects the shape: `jmespath` wraps a field mapping config, `gotmpl`
//! carries a text template and its content type.

use crate::Result;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use transform_jmes::JmesTransformerConfig;
use transform_text::TextTemplateTransformerConfig;
use transform_types::decode::{self, Tagged, TaggedDocument};
use transform_types::{IsZero, TemplateType};

/// Configuration of a template transformer
#[derive(Debug, Clone)]
pub enum TemplateTransformerConfig {
    JmesPath(JmesTransformerConfig),
    Text(TextTemplateTransformerConfig),
}

impl TemplateTransformerConfig {
    #[must_use]
    pub fn template_type(&self) -> TemplateType {
        match self {
            Self::JmesPath(config) => config.template_type(),
            Self::Text(config) => config.template_type(),
        }
    }

    /// Check that the configuration carries template content
    ///
    /// # Errors
    ///
    /// Returns `template content must not be empty` when the template string
    /// or the field mapping is missing.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::JmesPath(config) => config.validate()?,
            Self::Text(config) => config.validate()?,
        }
        Ok(())
    }

    /// Decode a JSON document
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an unsupported `type` tag at
    /// any level.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(decode::from_json_str(input)?)
    }

    /// Decode a JSON document from raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an unsupported `type` tag at
    /// any level.
    pub fn from_json_slice(input: &[u8]) -> Result<Self> {
        Ok(decode::from_json_slice(input)?)
    }

    /// Decode a YAML document
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML or an unsupported `type` tag at
    /// any level.
    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(decode::from_yaml_str(input)?)
    }

    /// Decode a YAML document from raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML or an unsupported `type` tag at
    /// any level.
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

impl IsZero for TemplateTransformerConfig {
    fn is_zero(&self) -> bool {
        match self {
            Self::JmesPath(config) => config.is_zero(),
            Self::Text(config) => config.is_zero(),
        }
    }
}

impl PartialEq for TemplateTransformerConfig {
    fn eq(&self, other: &Self) -> bool {
        if self.template_type() != other.template_type() {
            return false;
        }

        match (self, other) {
            (Self::JmesPath(a), Self::JmesPath(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl<'de> Deserialize<'de> for TemplateTransformerConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tagged = TaggedDocument::deserialize(deserializer)?;
        let kind = tagged
            .tag
            .parse::<TemplateType>()
            .map_err(de::Error::custom)?;

        match kind {
            TemplateType::JmesPath => tagged.into_shape().map(Self::JmesPath),
            TemplateType::Text => tagged.into_shape().map(Self::Text),
        }
    }
}

impl Serialize for TemplateTransformerConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let tag = self.template_type();
        match self {
            Self::JmesPath(config) => Tagged::new(tag, config).serialize(serializer),
            Self::Text(config) => Tagged::new(tag, config).serialize(serializer),
        }
    }
}

impl From<JmesTransformerConfig> for TemplateTransformerConfig {
    fn from(config: JmesTransformerConfig) -> Self {
        Self::JmesPath(config)
    }
}

impl From<TextTemplateTransformerConfig> for TemplateTransformerConfig {
    fn from(config: TextTemplateTransformerConfig) -> Self {
        Self::Text(config)
    }
}
