//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Bootstrap and application produce:
//!     → logging.rs (structured log events, fatal records)
//!     → metrics.rs (phase and failure counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through the per-request span
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
