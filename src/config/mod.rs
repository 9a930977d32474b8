//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! --conf <root> (file or directory)
//!     → loader.rs (resolve root, merge TOML file and PANDORA_* env with figment)
//!     → store.rs (Configuration: immutable, dotted-key typed getters)
//!     → shared via Arc to the assembler and the bootstrap sequencer
//!
//! schema.rs reads typed sections (http, log, metrics) out of the store.
//! validation.rs gates startup on the admin credential policy.
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All sections have defaults so a minimal file is enough
//! - Loading and validation are separate steps: validation runs only after
//!   the application has been assembled

pub mod loader;
pub mod schema;
pub mod store;
pub mod validation;

pub use loader::{load_config, load_config_with_env, ConfigError, ConfigRoot, DEFAULT_CONFIG_ROOT};
pub use schema::{HttpSettings, LogFormat, LogSettings, MetricsSettings};
pub use store::Configuration;
pub use validation::{validate_admin_password, ValidationError};
