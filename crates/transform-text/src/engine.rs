//! Rendering engine adapter
//!
//! Both engine flavours share one surface: parse a named template once,
//! render it against any number of values.
//!
//! An object input is the template context, so its keys are top-level
//! variables. Any other input (array, string, number, ...) is exposed as
//! `input`. Rendered text is returned as is, trailing newline included.
//!
//! Besides the minijinja builtins, templates get the `minijinja-contrib`
//! helpers and a `fail(message)` function that aborts rendering.

use crate::{Error, Result};
use minijinja::{AutoEscape, Environment, ErrorKind, context};
use serde_json::Value;

const CONTENT_TYPE_HTML: &str = "text/html";

fn fail(message: String) -> std::result::Result<minijinja::Value, minijinja::Error> {
    Err(minijinja::Error::new(ErrorKind::InvalidOperation, message))
}

/// Rendering engine flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateEngine {
    /// HTML-aware rendering: interpolated values are escaped
    Html,

    /// Plain text rendering
    Text,
}

impl TemplateEngine {
    /// Pick the engine for a declared content type
    #[must_use]
    pub fn for_content_type(content_type: &str) -> Self {
        if content_type.starts_with(CONTENT_TYPE_HTML) {
            Self::Html
        } else {
            Self::Text
        }
    }

    /// Parse `source` as a template called `name`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the template has a syntax error.
    pub fn parse(self, name: &str, source: &str) -> Result<ParsedTemplate> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        minijinja_contrib::add_to_environment(&mut env);
        env.add_function("fail", fail);
        match self {
            Self::Html => env.set_auto_escape_callback(|_| AutoEscape::Html),
            Self::Text => env.set_auto_escape_callback(|_| AutoEscape::None),
        }

        env.add_template_owned(name.to_string(), source.to_string())
            .map_err(|e| Error::parse(name, e))?;

        Ok(ParsedTemplate {
            engine: self,
            name: name.to_string(),
            source: source.to_string(),
            env,
        })
    }
}

/// A parsed template ready for rendering.
///
/// The underlying environment is immutable after parsing and is `Send +
/// Sync`, so one instance may render from many threads at once.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    engine: TemplateEngine,
    name: String,
    source: String,
    env: Environment<'static>,
}

impl ParsedTemplate {
    #[must_use]
    pub fn engine(&self) -> TemplateEngine {
        self.engine
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the template with `data` as its context
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when template execution fails.
    pub fn render(&self, data: &Value) -> Result<String> {
        let template = self.env.get_template(&self.name).map_err(Error::Render)?;
        let rendered = if data.is_object() {
            template.render(data)
        } else {
            template.render(context! { input => data })
        };
        rendered.map_err(Error::Render)
    }
}

impl PartialEq for ParsedTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.engine == other.engine && self.source == other.source
    }
}
