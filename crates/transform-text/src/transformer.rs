//! Text template transformer

use crate::config::TextTemplateTransformerConfig;
use crate::engine::{ParsedTemplate, TemplateEngine};
use crate::{Error, Result};
use serde_json::Value;
use tracing::{debug, trace};
use transform_types::{IsZero, TemplateType};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Transforms data by rendering a parsed text template
#[derive(Debug, Clone, PartialEq)]
pub struct TextTemplateTransformer {
    content_type: String,
    template: ParsedTemplate,
}

impl TextTemplateTransformer {
    /// Parse the configured template
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] naming the transformer when the template has
    /// a syntax error.
    pub fn new(name: &str, config: &TextTemplateTransformerConfig) -> Result<Self> {
        let engine = TemplateEngine::for_content_type(&config.content_type);
        debug!(name, ?engine, content_type = %config.content_type, "parsing text template");

        Ok(Self {
            content_type: config.content_type.clone(),
            template: engine.parse(name, &config.template)?,
        })
    }

    #[must_use]
    pub const fn template_type(&self) -> TemplateType {
        TemplateType::Text
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub fn template(&self) -> &ParsedTemplate {
        &self.template
    }

    /// Render the template against `data`.
    ///
    /// `application/json` output is decoded into a value; any other content
    /// type is returned as the rendered string.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering fails or JSON output does not decode.
    pub fn transform(&self, data: &Value) -> Result<Value> {
        trace!(name = self.template.name(), "rendering text template");
        let rendered = self.template.render(data)?;

        if self.content_type == CONTENT_TYPE_JSON {
            return serde_json::from_str(&rendered).map_err(Error::JsonResult);
        }

        Ok(Value::String(rendered))
    }
}

impl IsZero for TextTemplateTransformer {
    fn is_zero(&self) -> bool {
        self.content_type.is_empty() && self.template.source().is_empty()
    }
}
