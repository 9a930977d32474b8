//! Dependency assembly.
//!
//! # Data Flow
//! ```text
//! Arc<Configuration>
//!     → Assembler::assemble
//!     → Assembly { outcome: Result<App, AssemblyError>, release: Release }
//!     → Application::run(Shutdown) blocks for the service lifetime
//! ```
//!
//! # Design Decisions
//! - The release is returned next to the outcome, not inside it: an assembler
//!   that fails halfway still hands back cleanup for what it acquired
//! - `Application::run` consumes the application, so it cannot be re-entered
//! - The root `Shutdown` is the only cancellation channel handed to `run`

pub mod assembler;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{ConfigError, Configuration};
use crate::lifecycle::{Release, Shutdown};

pub use assembler::ServiceAssembler;

/// Failure to build the application object graph.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{component} unavailable: {message}")]
    Component {
        component: &'static str,
        message: String,
    },
}

/// Abnormal termination of a running application.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("server I/O error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("application failed: {0}")]
    Failed(String),
}

/// Result of invoking an assembler.
#[derive(Debug)]
pub struct Assembly<A> {
    pub outcome: Result<A, AssemblyError>,

    /// Cleanup for whatever was acquired, valid even when `outcome` is `Err`.
    pub release: Release,
}

impl<A> Assembly<A> {
    pub fn ready(application: A, release: Release) -> Self {
        Self {
            outcome: Ok(application),
            release,
        }
    }

    pub fn failed(error: impl Into<AssemblyError>, release: Release) -> Self {
        Self {
            outcome: Err(error.into()),
            release,
        }
    }
}

/// A fully wired service with one blocking lifecycle operation.
#[async_trait]
pub trait Application: Send + 'static {
    /// Serve until `shutdown` is triggered or a fatal condition occurs.
    async fn run(self, shutdown: Shutdown) -> Result<(), RunError>;
}

/// Builds the application from configuration.
#[async_trait]
pub trait Assembler: Send + Sync {
    type App: Application;

    async fn assemble(&self, config: Arc<Configuration>) -> Assembly<Self::App>;
}
