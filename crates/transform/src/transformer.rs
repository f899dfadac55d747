//! Template transformer
//!
//! Runtime dispatcher built from a validated configuration. The field
//! mapping flavour evaluates its tree, the text flavour renders its parsed
//! template.

use crate::Result;
use crate::config::TemplateTransformerConfig;
use serde_json::Value;
use tracing::debug;
use transform_jmes::JmesTemplateTransformer;
use transform_text::TextTemplateTransformer;
use transform_types::{GetEnvFn, IsZero, TemplateType, get_os_env};

/// A transformer ready to apply to input data
#[derive(Debug, Clone)]
pub enum TemplateTransformer {
    JmesPath(JmesTemplateTransformer),
    Text(TextTemplateTransformer),
}

impl TemplateTransformer {
    /// Build a transformer, resolving environment references from the
    /// process environment
    ///
    /// # Errors
    ///
    /// See [`Self::build_with_env`].
    pub fn build(name: &str, config: &TemplateTransformerConfig) -> Result<Self> {
        Self::build_with_env(name, config, &get_os_env)
    }

    /// Build a transformer with a custom environment lookup.
    ///
    /// The configuration is validated first and its error returned as is.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails, the field mapping tree is
    /// incomplete, or the text template does not parse.
    pub fn build_with_env(
        name: &str,
        config: &TemplateTransformerConfig,
        get_env: &GetEnvFn,
    ) -> Result<Self> {
        config.validate()?;
        debug!(name, template_type = %config.template_type(), "building template transformer");

        match config {
            TemplateTransformerConfig::JmesPath(conf) => {
                let Some(template) = &conf.template else {
                    return Err(transform_types::Error::TemplateContentRequired.into());
                };
                let field_mapping = template.evaluate(get_env)?;
                Ok(Self::JmesPath(JmesTemplateTransformer::new(field_mapping)))
            }
            TemplateTransformerConfig::Text(conf) => {
                Ok(Self::Text(TextTemplateTransformer::new(name, conf)?))
            }
        }
    }

    #[must_use]
    pub fn template_type(&self) -> TemplateType {
        match self {
            Self::JmesPath(transformer) => transformer.template_type(),
            Self::Text(transformer) => transformer.template_type(),
        }
    }

    /// Apply the transformer to `data`
    ///
    /// # Errors
    ///
    /// Returns the evaluation or rendering error of the underlying transformer.
    pub fn transform(&self, data: &Value) -> Result<Value> {
        match self {
            Self::JmesPath(transformer) => Ok(transformer.transform(data)?),
            Self::Text(transformer) => Ok(transformer.transform(data)?),
        }
    }
}

impl IsZero for TemplateTransformer {
    fn is_zero(&self) -> bool {
        match self {
            Self::JmesPath(transformer) => transformer.is_zero(),
            Self::Text(transformer) => transformer.is_zero(),
        }
    }
}

impl PartialEq for TemplateTransformer {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

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

impl From<JmesTemplateTransformer> for TemplateTransformer {
    fn from(transformer: JmesTemplateTransformer) -> Self {
        Self::JmesPath(transformer)
    }
}

impl From<TextTemplateTransformer> for TemplateTransformer {
    fn from(transformer: TextTemplateTransformer) -> Self {
        Self::Text(transformer)
    }
}
