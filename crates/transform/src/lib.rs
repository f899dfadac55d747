//! # transform
//!
//! Declarative data transformation driven by a configuration document.
//!
//! A [`TemplateTransformerConfig`] is decoded once from JSON or YAML, then
//! [`TemplateTransformer::build`] validates it and produces an immutable
//! transformer that can be applied to any number of input documents.
//!
//! ```no_run
//! use serde_json::json;
//! use transform::{TemplateTransformer, TemplateTransformerConfig};
//!
//! # fn main() -> transform::Result<()> {
//! let config = TemplateTransformerConfig::from_yaml(
//!     "type: jmespath\ntemplate:\n  type: field\n  path: users[*].name\n",
//! )?;
//! let transformer = TemplateTransformer::build("names", &config)?;
//! let names = transformer.transform(&json!({"users": [{"name": "Alice"}]}))?;
//! assert_eq!(names, json!(["Alice"]));
//! # Ok(())
//! # }
//! ```
//!
//! A built transformer holds no mutable state. It is `Send + Sync` and may
//! be shared across threads; both rendering back-ends evaluate read-only.

pub mod config;
pub mod transformer;

pub use config::TemplateTransformerConfig;
pub use transformer::TemplateTransformer;

pub use transform_jmes::{
    FieldMapping, FieldMappingConfig, FieldMappingEntry, FieldMappingEntryConfig,
    FieldMappingEntryString, FieldMappingEntryStringConfig, FieldMappingObject,
    FieldMappingObjectConfig, FieldMappingType, JmesTemplateTransformer, JmesTransformerConfig,
};
pub use transform_text::{TextTemplateTransformer, TextTemplateTransformerConfig};
pub use transform_types::{EnvAny, EnvString, GetEnvFn, IsZero, TemplateType, Value, get_os_env};

/// Lower-level crates, for callers that need their full APIs.
pub use transform_jmes as jmes;
pub use transform_text as text;
pub use transform_types as types;

use thiserror::Error;

/// Errors that can occur while decoding, building, or running a transformer
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Types(#[from] transform_types::Error),

    #[error(transparent)]
    Jmes(#[from] transform_jmes::Error),

    #[error(transparent)]
    Text(#[from] transform_text::Error),
}

impl From<transform_types::DocumentError> for Error {
    fn from(err: transform_types::DocumentError) -> Self {
        Self::Types(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
