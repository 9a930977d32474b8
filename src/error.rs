//! Terminal startup and runtime failures.

use thiserror::Error;

use crate::config::{ConfigError, ValidationError};
use crate::observability::logging::LoggingError;
use crate::wire::{AssemblyError, RunError};

/// Every way the bootstrap sequence can end the process.
///
/// None of these are recovered from: each is reported once and the process
/// exits non-zero.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Run(#[from] RunError),
}

impl BootstrapError {
    /// Name of the stage that failed, for the `stage` log field and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            BootstrapError::Config(_) => "config",
            BootstrapError::Logging(_) => "logging",
            BootstrapError::Assembly(_) => "assembly",
            BootstrapError::Validation(_) => "validation",
            BootstrapError::Run(_) => "run",
        }
    }

    /// Operator-facing summary used as the fatal record's message.
    pub fn headline(&self) -> &'static str {
        match self {
            BootstrapError::Config(_) => "Failed to load configuration",
            BootstrapError::Logging(_) => "Failed to initialize logger",
            BootstrapError::Assembly(_) => "Failed to initialize application",
            BootstrapError::Validation(_) => {
                "Invalid admin password: must be at least 8 characters long"
            }
            BootstrapError::Run(_) => "Server failed to run",
        }
    }

    /// Whether the failure was already written to the log as a fatal record.
    ///
    /// Configuration and logger failures happen before a logger exists and
    /// must go to stderr instead.
    pub fn reported_via_log(&self) -> bool {
        !matches!(self, BootstrapError::Config(_) | BootstrapError::Logging(_))
    }
}
