//! Environment-aware configuration values
//!
//! A configuration value may name an environment variable that overrides
//! its literal value. Lookups go through an injectable [`GetEnvFn`] so
//! evaluation stays testable without touching the process environment.

use crate::types::IsZero;
use crate::{Error, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// Environment lookup function. An unset variable yields an empty string.
pub type GetEnvFn = dyn Fn(&str) -> Result<String>;

/// Read a variable from the process environment
///
/// # Errors
///
/// Returns an error when the variable is set but is not valid unicode.
pub fn get_os_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(std::env::VarError::NotPresent) => Ok(String::new()),
        Err(err @ std::env::VarError::NotUnicode(_)) => Err(Error::env(name, err.to_string())),
    }
}

fn lookup(env: Option<&str>, get_env: &GetEnvFn) -> Result<Option<String>> {
    let Some(name) = env.filter(|name| !name.is_empty()) else {
        return Ok(None);
    };

    let raw = get_env(name)?;
    if raw.is_empty() {
        trace!(
            env = name,
            "environment variable is empty, using literal value"
        );
        return Ok(None);
    }

    trace!(env = name, "using value from environment variable");
    Ok(Some(raw))
}

/// Whether a document is the `{value, env}` form rather than a bare literal.
fn is_env_shape(raw: &Value) -> bool {
    raw.as_object().is_some_and(|map| {
        !map.is_empty() && map.keys().all(|key| key == "value" || key == "env")
    })
}

#[derive(Deserialize)]
struct RawEnv<T> {
    #[serde(default)]
    value: Option<T>,
    #[serde(default)]
    env: Option<String>,
}

/// A value of any type that an environment variable can override.
///
/// Decodes from either a bare literal or the `{value, env}` form. A literal
/// mapping whose only keys are `value` and/or `env` is read as the latter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvAny {
    /// Literal value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Name of the environment variable that takes precedence when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl EnvAny {
    /// Create a literal value
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            env: None,
        }
    }

    /// Create a value read from an environment variable
    pub fn from_env(env: impl Into<String>) -> Self {
        Self {
            value: None,
            env: Some(env.into()),
        }
    }

    /// Use `env` as an override for the literal value
    #[must_use]
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Resolve the value against the process environment
    ///
    /// # Errors
    ///
    /// Returns an error when the environment lookup fails.
    pub fn get(&self) -> Result<Value> {
        self.get_custom(&get_os_env)
    }

    /// Resolve the value with a custom environment lookup.
    ///
    /// A non-empty variable is parsed as JSON, falling back to the raw
    /// string when it is not valid JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the environment lookup fails.
    pub fn get_custom(&self, get_env: &GetEnvFn) -> Result<Value> {
        if let Some(raw) = lookup(self.env.as_deref(), get_env)? {
            return Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)));
        }

        Ok(self.value.clone().unwrap_or(Value::Null))
    }
}

impl<'de> Deserialize<'de> for EnvAny {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if is_env_shape(&raw) {
            let RawEnv { value, env } =
                serde_json::from_value::<RawEnv<Value>>(raw).map_err(de::Error::custom)?;
            return Ok(Self {
                value: value.filter(|value| !value.is_null()),
                env,
            });
        }

        if raw.is_null() {
            return Ok(Self::default());
        }

        Ok(Self::new(raw))
    }
}

impl IsZero for EnvAny {
    fn is_zero(&self) -> bool {
        self.value.is_none() && self.env.is_none()
    }
}

/// A string value that an environment variable can override
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct EnvString {
    /// Literal value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Name of the environment variable that takes precedence when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl EnvString {
    /// Create a literal value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            env: None,
        }
    }

    /// Create a value read from an environment variable
    pub fn from_env(env: impl Into<String>) -> Self {
        Self {
            value: None,
            env: Some(env.into()),
        }
    }

    /// Use `env` as an override for the literal value
    #[must_use]
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Resolve the value against the process environment
    ///
    /// # Errors
    ///
    /// Returns an error when the environment lookup fails.
    pub fn get(&self) -> Result<Option<String>> {
        self.get_custom(&get_os_env)
    }

    /// Resolve the value with a custom environment lookup
    ///
    /// # Errors
    ///
    /// Returns an error when the environment lookup fails.
    pub fn get_custom(&self, get_env: &GetEnvFn) -> Result<Option<String>> {
        if let Some(raw) = lookup(self.env.as_deref(), get_env)? {
            return Ok(Some(raw));
        }

        Ok(self.value.clone())
    }
}

impl<'de> Deserialize<'de> for EnvString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        match raw {
            Value::String(value) => Ok(Self::new(value)),
            Value::Null => Ok(Self::default()),
            raw if is_env_shape(&raw) => {
                let RawEnv { value, env } =
                    serde_json::from_value::<RawEnv<String>>(raw).map_err(de::Error::custom)?;
                Ok(Self { value, env })
            }
            other => Err(de::Error::custom(format!(
                "expected a string or an object with `value`/`env`, got {other}"
            ))),
        }
    }
}

impl IsZero for EnvString {
    fn is_zero(&self) -> bool {
        self.value.is_none() && self.env.is_none()
    }
}
