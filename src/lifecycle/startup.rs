//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and install the logger
//! - Invoke the assembler and hold its release until the sequence ends
//! - Gate on the admin credential before serving
//! - Announce readiness, run the application, report the outcome
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is retried
//! - Steps run in order on one task, never concurrently
//! - The release is bound to a local in `launch`, so it runs on every exit
//!   path of the sequence, including a panicking application

use std::fmt;
use std::sync::Arc;

use crate::config::{self, validation, ConfigRoot, Configuration, LogSettings};
use crate::error::BootstrapError;
use crate::lifecycle::readiness::Readiness;
use crate::lifecycle::Shutdown;
use crate::observability::{logging, metrics};
use crate::wire::{Application, Assembler, Assembly};

/// Lifecycle state of the bootstrap sequence.
///
/// Transitions are strictly forward in declaration order; `Stopped` and
/// `Fatal` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Start,
    ConfigLoaded,
    LoggerReady,
    /// Application built; its release is scheduled.
    Assembled,
    Validated,
    Running,
    Stopped,
    Fatal,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::ConfigLoaded => "config_loaded",
            Phase::LoggerReady => "logger_ready",
            Phase::Assembled => "assembled",
            Phase::Validated => "validated",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
            Phase::Fatal => "fatal",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Stopped | Phase::Fatal)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives configuration → logger → assembly → validation → run.
#[derive(Debug)]
pub struct Bootstrap {
    root: ConfigRoot,
    phase: Phase,
}

impl Bootstrap {
    pub fn new(root: ConfigRoot) -> Self {
        Self {
            root,
            phase: Phase::Start,
        }
    }

    pub fn root(&self) -> &ConfigRoot {
        &self.root
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Resolve the root and load the configuration.
    pub fn load_config(&mut self) -> Result<Arc<Configuration>, BootstrapError> {
        let config = config::load_config(&self.root)?;
        self.advance(Phase::ConfigLoaded);
        Ok(Arc::new(config))
    }

    /// Install the global log subscriber described by the `[log]` section.
    pub fn init_logging(&mut self, config: &Configuration) -> Result<(), BootstrapError> {
        let settings = LogSettings::from_config(config)?;
        logging::install(&settings)?;
        self.advance(Phase::LoggerReady);
        tracing::debug!(
            root = %self.root,
            level = %settings.level,
            format = %settings.format,
            "Logger ready"
        );
        Ok(())
    }

    /// Log through whatever subscriber is already in scope instead of
    /// installing one.
    ///
    /// For embedding the sequence in a host that owns logging, and for tests.
    pub fn use_current_logger(&mut self) {
        self.advance(Phase::LoggerReady);
    }

    /// Assemble, validate, announce and run the application.
    ///
    /// Every failure is logged as a single fatal record before it is
    /// returned. The assembler's release has run by the time this returns.
    pub async fn launch<A>(
        &mut self,
        config: Arc<Configuration>,
        assembler: &A,
        shutdown: Shutdown,
    ) -> Result<(), BootstrapError>
    where
        A: Assembler,
    {
        debug_assert_eq!(self.phase, Phase::LoggerReady, "launch before logger is ready");

        let Assembly { outcome, release } = assembler.assemble(Arc::clone(&config)).await;
        // Scheduled regardless of the outcome; dropped when this scope ends.
        let _release = release;

        let application = match outcome {
            Ok(application) => application,
            Err(e) => return Err(self.fail(e.into())),
        };
        self.advance(Phase::Assembled);

        if let Err(e) = validation::validate_admin_password(&config) {
            return Err(self.fail(e.into()));
        }
        self.advance(Phase::Validated);

        Readiness::from_config(&config).announce();

        self.advance(Phase::Running);
        match application.run(shutdown).await {
            Ok(()) => {
                self.advance(Phase::Stopped);
                tracing::info!("Server stopped");
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            next > self.phase && !self.phase.is_terminal(),
            "invalid transition {} -> {}",
            self.phase,
            next
        );
        self.phase = next;
        metrics::record_phase(next);
    }

    fn fail(&mut self, err: BootstrapError) -> BootstrapError {
        logging::fatal(&err);
        metrics::record_failure(err.stage());
        self.phase = Phase::Fatal;
        err
    }
}
