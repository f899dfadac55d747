//! # transform-jmes
//!
//! Field mappings evaluated with JMESPath lookups.
//!
//! A field mapping is a tree: a *field* looks up one path in the input
//! data and falls back to a default, an *object* assembles named child
//! mappings into a mapping. [`FieldMappingConfig`] is the serializable form
//! of the tree and evaluates into a runtime [`FieldMapping`].

pub mod config;
pub mod mapping;
pub mod mapping_config;
pub mod search;
pub mod transformer;
pub mod utils;

pub use config::JmesTransformerConfig;
pub use mapping::{
    FieldMapping, FieldMappingEntry, FieldMappingEntryString, FieldMappingObject, FieldMappingType,
};
pub use mapping_config::{
    FieldMappingConfig, FieldMappingEntryConfig, FieldMappingEntryStringConfig,
    FieldMappingObjectConfig,
};
pub use transformer::JmesTemplateTransformer;

use thiserror::Error;

/// Errors that can occur while decoding or evaluating field mappings
#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported field mapping type: {0}")]
    UnsupportedFieldMappingType(String),

    #[error("field mapping entry is malformed, expected a {expected}, got {found}")]
    MalformedEntry {
        expected: &'static str,
        found: &'static str,
    },

    #[error("field mapping entry must not be empty")]
    EntryRequired,

    #[error("field mapping object must not be null")]
    ObjectRequired,

    /// The path expression could not be compiled or evaluated
    #[error("failed to evaluate mapping entry `{path}`: {message}")]
    PathQuery { path: String, message: String },

    /// Failure inside a named object property
    #[error("{key}: {source}")]
    Property { key: String, source: Box<Error> },

    #[error(transparent)]
    Types(#[from] transform_types::Error),
}

impl Error {
    /// Wrap an error with the object property it occurred in
    pub fn property(key: impl Into<String>, source: Error) -> Self {
        Self::Property {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Build a path query error keeping the offending expression
    pub fn path_query(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PathQuery {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Innermost error once property context is peeled off
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Property { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<transform_types::DocumentError> for Error {
    fn from(err: transform_types::DocumentError) -> Self {
        Self::Types(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
