//! Read-only configuration store with dotted-key lookups.

use figment::{
    providers::{Format, Toml},
    value::{Dict, Value},
    Figment,
};
use serde::de::DeserializeOwned;

use crate::config::loader::ConfigError;

/// Immutable key/value view over the merged configuration layers.
///
/// Keys are dotted paths into nested tables (`http.port`,
/// `security.admin_password`). The typed getters are strict: a value of the
/// wrong type is an error, a missing value is `Ok(None)`. Strings that hold
/// numbers or booleans are accepted by [`get_int`](Self::get_int) and
/// [`get_bool`](Self::get_bool). Environment values are parsed by figment, so
/// [`get_str`](Self::get_str) accepts a scalar from the environment layer as
/// text (`PANDORA_SECURITY__ADMIN_PASSWORD=12345678`).
#[derive(Debug, Clone)]
pub struct Configuration {
    figment: Figment,
    /// Metadata name of the environment provider, if one was merged.
    env_layer: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            figment: Figment::new(),
            env_layer: None,
        }
    }
}

impl Configuration {
    /// Wrap a figment, surfacing provider errors (bad TOML, bad env) now
    /// rather than on first lookup.
    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract::<Dict>()?;
        Ok(Self {
            figment,
            env_layer: None,
        })
    }

    /// Parse a TOML document held in memory.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_figment(Figment::from(Toml::string(source)))?)
    }

    pub(crate) fn with_env_layer(mut self, name: impl Into<String>) -> Self {
        self.env_layer = Some(name.into());
        self
    }

    pub fn figment(&self) -> &Figment {
        &self.figment
    }

    /// Raw value at `key`, if present.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.figment.find_value(key).ok()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// String value at `key`.
    pub fn get_str(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(_, s)) => Ok(Some(s)),
            Some(value) if self.from_env_layer(&value) => scalar_text(&value)
                .map(Some)
                .ok_or_else(|| type_mismatch(key, "string", &value)),
            Some(other) => Err(type_mismatch(key, "string", &other)),
        }
    }

    /// Integer value at `key`.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(value @ Value::Num(..)) => value
                .to_i128()
                .and_then(|i| i64::try_from(i).ok())
                .map(Some)
                .ok_or_else(|| type_mismatch(key, "integer", &value)),
            Some(Value::String(tag, s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| type_mismatch(key, "integer", &Value::String(tag, s))),
            Some(other) => Err(type_mismatch(key, "integer", &other)),
        }
    }

    /// Boolean value at `key`.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(_, b)) => Ok(Some(b)),
            Some(Value::String(tag, s)) => s
                .trim()
                .parse::<bool>()
                .map(Some)
                .map_err(|_| type_mismatch(key, "boolean", &Value::String(tag, s))),
            Some(other) => Err(type_mismatch(key, "boolean", &other)),
        }
    }

    /// Lenient string rendering of the value at `key`.
    ///
    /// Scalars are rendered with their natural formatting; missing keys and
    /// tables/arrays yield an empty string. Only for observational use such as
    /// log messages, never for values that gate behavior.
    pub fn get_string(&self, key: &str) -> String {
        self.get(key)
            .and_then(|value| scalar_text(&value))
            .unwrap_or_default()
    }

    /// Deserialize the table at `key`, or `T::default()` when it is absent.
    pub fn section<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        if !self.contains(key) {
            return Ok(T::default());
        }
        self.figment
            .extract_inner::<T>(key)
            .map_err(|source| ConfigError::Section {
                key: key.to_string(),
                source,
            })
    }

    fn from_env_layer(&self, value: &Value) -> bool {
        match (&self.env_layer, self.figment.get_metadata(value.tag())) {
            (Some(layer), Some(metadata)) => metadata.name == layer.as_str(),
            _ => false,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(_, s) => Some(s.clone()),
        Value::Char(_, c) => Some(c.to_string()),
        Value::Bool(_, b) => Some(b.to_string()),
        Value::Num(..) => value
            .to_i128()
            .map(|i| i.to_string())
            .or_else(|| value.deserialize::<f64>().ok().map(|f| f.to_string())),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::String(..) => "string",
        Value::Char(..) => "char",
        Value::Bool(..) => "boolean",
        Value::Num(..) if value.to_i128().is_some() => "integer",
        Value::Num(..) => "float",
        Value::Empty(..) => "empty value",
        Value::Dict(..) => "table",
        Value::Array(..) => "array",
    }
}

fn type_mismatch(key: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::Type {
        key: key.to_string(),
        expected,
        found: kind(found),
    }
}
