//! Typed settings read from the configuration store.
//!
//! Each section has defaults for every field so a minimal file (just the
//! admin password) is enough to start the service.

use std::fmt;

use serde::Deserialize;

use crate::config::loader::ConfigError;
use crate::config::store::Configuration;

/// HTTP listener settings (`[http]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Host or IP the listener binds to.
    pub host: String,

    pub port: u16,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 30,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

impl HttpSettings {
    pub fn from_config(config: &Configuration) -> Result<Self, ConfigError> {
        config.section("http")
    }

    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Output encoding of log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for development.
    #[default]
    #[serde(alias = "console", alias = "text")]
    Pretty,
    /// One JSON object per record for log aggregation.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Logging settings (`[log]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive (`info`, `debug`, `pandora_helper=trace,tower_http=info`).
    pub level: String,

    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LogSettings {
    pub fn from_config(config: &Configuration) -> Result<Self, ConfigError> {
        config.section("log")
    }
}

/// Prometheus exporter settings (`[metrics]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    pub enabled: bool,

    /// Exporter bind address.
    pub address: String,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl MetricsSettings {
    pub fn from_config(config: &Configuration) -> Result<Self, ConfigError> {
        config.section("metrics")
    }
}
