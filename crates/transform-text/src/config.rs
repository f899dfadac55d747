//! Text template transformer configuration

use serde::{Deserialize, Serialize};
use transform_types::{IsZero, TemplateType};

/// Configuration of a transformer that renders a text template.
///
/// Tagged `gotmpl` in configuration documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTemplateTransformerConfig {
    /// Content type of the rendered output, e.g. `application/json`
    #[serde(default)]
    pub content_type: String,

    /// Template source
    #[serde(default)]
    pub template: String,
}

impl TextTemplateTransformerConfig {
    pub fn new(content_type: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            template: template.into(),
        }
    }

    #[must_use]
    pub const fn template_type(&self) -> TemplateType {
        TemplateType::Text
    }

    /// Check that template content is present. The template is not parsed.
    ///
    /// # Errors
    ///
    /// Returns [`transform_types::Error::TemplateContentRequired`] when the
    /// template is empty.
    pub fn validate(&self) -> transform_types::Result<()> {
        if self.template.is_empty() {
            return Err(transform_types::Error::TemplateContentRequired);
        }

        Ok(())
    }
}

impl IsZero for TextTemplateTransformerConfig {
    fn is_zero(&self) -> bool {
        self.content_type.is_empty() && self.template.is_empty()
    }
}
