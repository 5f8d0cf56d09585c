//! Command/event protocol between the controller and the store worker.

use sharebin_core::models::paste::Paste;

use crate::error::ErrorKind;

/// Store requests issued by the controller.
///
/// Each command carries the controller generation at issue time so the
/// matching completion can be recognized (or discarded as stale).
#[derive(Debug, Clone)]
pub enum StoreCmd {
    /// Create a new paste from the submitted draft.
    Create {
        generation: u64,
        title: Option<String>,
        content: String,
        language: Option<String>,
    },
    /// Load a single paste by id.
    Load { generation: u64, id: String },
    /// Delete a paste by id.
    Delete { generation: u64, id: String },
}

/// Completions produced by the store worker.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A paste was created and assigned an id.
    Created { generation: u64, paste: Paste },
    /// The requested paste was loaded.
    Loaded { generation: u64, paste: Paste },
    /// The paste was deleted server-side.
    Deleted { generation: u64, id: String },
    /// The server knows no paste with this id.
    Missing { generation: u64, id: String },
    /// The request could not complete.
    Failed {
        generation: u64,
        kind: ErrorKind,
        message: String,
    },
}

impl StoreEvent {
    /// Generation stamp carried by this completion.
    pub fn generation(&self) -> u64 {
        match self {
            StoreEvent::Created { generation, .. }
            | StoreEvent::Loaded { generation, .. }
            | StoreEvent::Deleted { generation, .. }
            | StoreEvent::Missing { generation, .. }
            | StoreEvent::Failed { generation, .. } => *generation,
        }
    }
}
