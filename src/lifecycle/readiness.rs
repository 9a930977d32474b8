//! Startup announcement.

use crate::config::Configuration;
use crate::http::docs::DOCS_PATH;

/// Externally reachable addresses announced once the service is about to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub host: String,
    pub docs: String,
}

impl Readiness {
    /// Derive the addresses from `http.host` and `http.port`.
    ///
    /// Missing or malformed values degrade to an empty host and port `0`;
    /// they only affect the message.
    pub fn from_config(config: &Configuration) -> Self {
        let host = config.get_string("http.host");
        let port = config.get_int("http.port").ok().flatten().unwrap_or(0);
        Self::new(&host, port)
    }

    pub fn new(host: &str, port: i64) -> Self {
        let base = format!("http://{}:{}", host, port);
        Self {
            docs: format!("{}{}", base, DOCS_PATH),
            host: base,
        }
    }

    /// Emit the "Server starting" record.
    pub fn announce(&self) {
        tracing::info!(host = %self.host, docs = %self.docs, "Server starting");
    }
}
