#![deny(rust_2018_idioms)]
#![warn(clippy::all)]

//! # transform-types
//!
//! Shared vocabulary for the template transformer crates.
//!
//! This crate holds the pieces every transformer flavour needs: the
//! discriminator tag of a transformer configuration, the zero-value check,
//! environment-aware configuration values, and the helpers that decode
//! tagged JSON/YAML documents.

/// JSON/YAML document decoding and the tag-peeking helper for tagged unions.
pub mod decode;
/// Environment-aware configuration values and environment lookup.
pub mod env;
/// Transformer discriminator tag and the zero-value trait.
pub mod types;

pub use decode::{DocumentError, DocumentFormat, Tagged, TaggedDocument};
pub use env::{EnvAny, EnvString, GetEnvFn, get_os_env};
pub use types::{IsZero, TemplateType};

/// Re-exported so downstream crates name the same `Value`.
pub use serde_json::Value;

use thiserror::Error;

/// Errors shared by every transformer flavour
#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported transformer type: {0}")]
    UnsupportedTransformerType(String),

    #[error("template content must not be empty")]
    TemplateContentRequired,

    #[error("failed to read environment variable {name}: {message}")]
    Env { name: String, message: String },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl Error {
    /// Build an unsupported-transformer-type error from the offending tag.
    pub fn unsupported_transformer_type(tag: impl Into<String>) -> Self {
        Self::UnsupportedTransformerType(tag.into())
    }

    /// Build an environment lookup error for a variable.
    pub fn env(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Env {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, Error>;
