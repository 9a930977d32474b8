//! Structured logging.
//!
//! # Responsibilities
//! - Install the process-wide subscriber from `[log]` settings
//! - Emit the fatal record that precedes a non-zero exit
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` overrides the configured level when set
//! - `tracing` has no fatal level: fatal records are ERROR events tagged
//!   `severity = "fatal"`, and the caller ends the process after cleanup

use thiserror::Error;
use tracing_subscriber::{
    filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter,
};

use crate::config::{LogFormat, LogSettings};
use crate::error::BootstrapError;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level `{level}` from {origin}: {source}")]
    InvalidLevel {
        level: String,
        origin: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("failed to install log subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Build the level filter: `RUST_LOG` when set, the configured level otherwise.
pub fn build_filter(settings: &LogSettings) -> Result<EnvFilter, LoggingError> {
    let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV)
        .map(|directives| directives.to_string_lossy().into_owned());
    filter_from(from_env, settings)
}

/// An invalid `RUST_LOG` is an error, not a silent fallback to `[log]`.
fn filter_from(from_env: Option<String>, settings: &LogSettings) -> Result<EnvFilter, LoggingError> {
    let (level, origin) = match from_env {
        Some(directives) => (directives, EnvFilter::DEFAULT_ENV),
        None => (settings.level.clone(), "log.level"),
    };
    EnvFilter::try_new(&level).map_err(|source| LoggingError::InvalidLevel {
        level,
        origin,
        source,
    })
}

/// Install the global subscriber.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn install(settings: &LogSettings) -> Result<(), LoggingError> {
    let filter = build_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    match settings.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init()?,
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
    }
    Ok(())
}

/// Emit the fatal record for a terminal failure.
pub fn fatal(err: &BootstrapError) {
    tracing::error!(
        severity = "fatal",
        stage = err.stage(),
        error = %err,
        "{}",
        err.headline()
    );
}
