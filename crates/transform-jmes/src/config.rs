//! JMESPath transformer configuration

use crate::mapping_config::FieldMappingConfig;
use serde::{Deserialize, Serialize};
use transform_types::{IsZero, TemplateType};

/// Configuration of a transformer driven by a field mapping tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JmesTransformerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<FieldMappingConfig>,
}

impl JmesTransformerConfig {
    pub fn new(template: impl Into<FieldMappingConfig>) -> Self {
        Self {
            template: Some(template.into()),
        }
    }

    #[must_use]
    pub const fn template_type(&self) -> TemplateType {
        TemplateType::JmesPath
    }

    /// Check that a field mapping is present.
    ///
    /// Only emptiness is checked; the tree itself is validated when it is
    /// evaluated into a transformer.
    ///
    /// # Errors
    ///
    /// Returns [`transform_types::Error::TemplateContentRequired`] when the
    /// field mapping is absent or empty.
    pub fn validate(&self) -> transform_types::Result<()> {
        if self.template.is_zero() {
            return Err(transform_types::Error::TemplateContentRequired);
        }

        Ok(())
    }
}

impl IsZero for JmesTransformerConfig {
    fn is_zero(&self) -> bool {
        self.template.is_zero()
    }
}
