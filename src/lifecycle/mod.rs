//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Install logger → Assemble (+release scheduled)
//!     → Validate credential → Announce (readiness.rs) → Run
//!
//! Shutdown (shutdown.rs):
//!     Root token cancelled → application drains → release runs → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger the root shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logger, then the application
//! - Cleanup is owned by a single `Release` (release.rs) that runs exactly once
//! - No retries and no timeout on `run`: cancellation belongs to the caller

pub mod readiness;
pub mod release;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use readiness::Readiness;
pub use release::Release;
pub use shutdown::Shutdown;
pub use startup::{Bootstrap, Phase};

use crate::config::{ConfigRoot, MetricsSettings};
use crate::error::BootstrapError;
use crate::observability::metrics;
use crate::wire::Assembler;

/// Run the full bootstrap sequence for `root` until the application stops.
///
/// Returns once the application has stopped and the assembler's release has
/// run. The error, if any, has already been reported as a fatal log record
/// unless [`BootstrapError::reported_via_log`] says otherwise.
pub async fn run<A>(root: ConfigRoot, assembler: A, shutdown: Shutdown) -> Result<(), BootstrapError>
where
    A: Assembler,
{
    let mut bootstrap = Bootstrap::new(root);
    let config = bootstrap.load_config()?;
    bootstrap.init_logging(&config)?;

    match MetricsSettings::from_config(&config) {
        Ok(settings) => metrics::init_metrics(&settings),
        Err(e) => tracing::warn!(error = %e, "Ignoring invalid metrics settings"),
    }

    bootstrap.launch(config, &assembler, shutdown).await
}
