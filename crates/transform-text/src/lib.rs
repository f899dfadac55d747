//! # transform-text
//!
//! Transformer that renders input data through a text template.
//!
//! The declared content type picks the rendering engine (HTML-escaping for
//! `text/html`, plain text otherwise) and how the rendered text is returned
//! (`application/json` output is decoded back into a value).

pub mod config;
pub mod engine;
pub mod transformer;

pub use config::TextTemplateTransformerConfig;
pub use engine::{ParsedTemplate, TemplateEngine};
pub use transformer::TextTemplateTransformer;

use thiserror::Error;

/// Errors raised while building or running a text template transformer
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse template {name:?}: {source}")]
    Parse {
        name: String,
        source: minijinja::Error,
    },

    #[error("failed to execute template: {0}")]
    Render(#[source] minijinja::Error),

    #[error("failed to unmarshal JSON result: {0}")]
    JsonResult(#[source] serde_json::Error),

    #[error(transparent)]
    Types(#[from] transform_types::Error),
}

impl Error {
    /// Build a parse error naming the template
    pub fn parse(name: impl Into<String>, source: minijinja::Error) -> Self {
        Self::Parse {
            name: name.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
