//! Transformer discriminator tag and zero-value check

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminator of a template transformer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateType {
    /// Field mappings evaluated with JMESPath lookups.
    #[serde(rename = "jmespath")]
    JmesPath,

    /// A text template rendered against the input data.
    ///
    /// Tagged `gotmpl` in configuration documents.
    #[serde(rename = "gotmpl")]
    Text,
}

impl TemplateType {
    /// Tag as written in configuration documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JmesPath => "jmespath",
            Self::Text => "gotmpl",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "jmespath" => Ok(Self::JmesPath),
            "gotmpl" => Ok(Self::Text),
            other => Err(crate::Error::unsupported_transformer_type(other)),
        }
    }
}

/// Values that have an "empty" state distinct from being absent.
pub trait IsZero {
    /// Returns true when the value carries no configuration at all.
    fn is_zero(&self) -> bool;
}

impl<T: IsZero> IsZero for Option<T> {
    fn is_zero(&self) -> bool {
        self.as_ref().is_none_or(IsZero::is_zero)
    }
}

impl<T: IsZero + ?Sized> IsZero for Box<T> {
    fn is_zero(&self) -> bool {
        self.as_ref().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flag(bool);

    impl IsZero for Flag {
        fn is_zero(&self) -> bool {
            !self.0
        }
    }

    #[test]
    fn test_template_type_round_trips_through_str() {
        for tag in [TemplateType::JmesPath, TemplateType::Text] {
            assert_eq!(tag.as_str().parse::<TemplateType>().unwrap(), tag);
        }
    }

    #[test]
    fn test_template_type_rejects_unknown_tag() {
        let err = "handlebars".parse::<TemplateType>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported transformer type: handlebars");
    }

    #[test]
    fn test_template_type_serde_tags() {
        assert_eq!(
            serde_json::to_string(&TemplateType::Text).unwrap(),
            "\"gotmpl\""
        );
        let tag: TemplateType = serde_json::from_str("\"jmespath\"").unwrap();
        assert_eq!(tag, TemplateType::JmesPath);
    }

    #[test]
    fn test_option_is_zero() {
        assert!(None::<Flag>.is_zero());
        assert!(Some(Flag(false)).is_zero());
        assert!(!Some(Flag(true)).is_zero());
    }
}
