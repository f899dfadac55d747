//! JMESPath template transformer

use crate::Result;
use crate::mapping::FieldMapping;
use serde_json::Value;
use tracing::trace;
use transform_types::{IsZero, TemplateType};

/// Transforms data by evaluating a field mapping tree
#[derive(Debug, Clone, PartialEq)]
pub struct JmesTemplateTransformer {
    template: FieldMapping,
}

impl JmesTemplateTransformer {
    #[must_use]
    pub fn new(template: FieldMapping) -> Self {
        Self { template }
    }

    #[must_use]
    pub const fn template_type(&self) -> TemplateType {
        TemplateType::JmesPath
    }

    #[must_use]
    pub fn template(&self) -> &FieldMapping {
        &self.template
    }

    /// Evaluate the field mapping against `data`
    ///
    /// # Errors
    ///
    /// Returns the evaluation error of the field mapping.
    pub fn transform(&self, data: &Value) -> Result<Value> {
        trace!(field_type = %self.template.field_type(), "transforming with field mapping");
        self.template.evaluate(data)
    }
}

impl IsZero for JmesTemplateTransformer {
    fn is_zero(&self) -> bool {
        self.template.is_zero()
    }
}
