//! Pandora Helper API server library.
//!
//! Turns static configuration into a running, supervisable service and
//! guarantees orderly teardown on every exit path.
//!
//! ```text
//!   --conf data/
//!        │
//!        ▼
//!   ┌──────────┐   ┌──────────┐   ┌─────────────┐   ┌────────────┐   ┌─────────┐
//!   │  config  │──▶│ logging  │──▶│    wire     │──▶│ validation │──▶│   run   │
//!   │  loader  │   │ (tracing)│   │ (assembler) │   │ (password) │   │  (http) │
//!   └──────────┘   └──────────┘   └──────┬──────┘   └────────────┘   └────┬────┘
//!                                        │ Release (runs exactly once)    │
//!                                        └────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod wire;

pub use config::{ConfigRoot, Configuration};
pub use error::BootstrapError;
pub use lifecycle::{Bootstrap, Phase, Release, Shutdown};
pub use wire::{Application, Assembler, Assembly, ServiceAssembler};
