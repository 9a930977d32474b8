//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP listener (bound by the assembler)
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, per-request span)
//!     → handlers: /health, docs.rs (/swagger/index.html, /swagger/doc.json)
//!     → Send to client
//! ```
//!
//! Business routes live outside this crate; only operational endpoints are
//! served here.

pub mod docs;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
