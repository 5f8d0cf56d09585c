//! Core domain library for Sharebin (config, storage, models, highlighting).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Paste storage layer.
pub mod db;
/// Application error types (storage/domain).
pub mod error;
/// Syntax highlighting capability.
pub mod highlight;
/// Opaque paste identifier generation.
pub mod ids;
/// Data models for API requests and persistence.
pub mod models;

pub use config::Config;
pub use constants::{DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT, DEFAULT_SERVER_URL};
pub use db::Database;
pub use error::AppError;
pub use highlight::{Highlighted, Highlighter};
