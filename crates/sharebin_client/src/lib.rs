//! Client-side view-model controller for the Sharebin paste API.
//!
//! The controller owns the single "current paste" (or none) plus the
//! in-progress draft, and synchronizes them with an explicit [`Location`].
//! Store I/O runs on a worker task behind a generation-stamped command/event
//! protocol so stale completions are detected and discarded.

/// HTTP client for the paste store API.
pub mod api;
/// View-model controller owning the current paste state.
pub mod controller;
/// Client error taxonomy.
pub mod error;
/// Address-bar model for shareable paste URLs.
pub mod location;
/// Command/event protocol between controller and store worker.
pub mod protocol;
/// Store worker task performing the HTTP calls.
pub mod worker;

pub use api::ApiClient;
pub use controller::{PasteController, PasteView};
pub use error::{ErrorKind, StoreError, UiError};
pub use location::Location;
pub use protocol::{StoreCmd, StoreEvent};
pub use worker::{spawn_store_worker, StoreHandle};
