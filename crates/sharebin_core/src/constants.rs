//! Shared constants used across Sharebin crates.

/// Default API port for Sharebin.
pub const DEFAULT_PORT: u16 = 38460;

/// Default maximum paste size accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 10 * 1024 * 1024;

/// Default base URL for CLI/API clients.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:38460";

/// Length of server-assigned paste identifiers.
pub const PASTE_ID_LEN: usize = 8;
