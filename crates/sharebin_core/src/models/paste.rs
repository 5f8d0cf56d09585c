use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

/// A stored, uniquely-identified text snippet.
///
/// `content` is immutable once saved; the store exposes create, read, and
/// delete only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub title: Option<String>,
    pub content: String,
    /// Rendering hint supplied by the client at submission time; stored verbatim.
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a paste.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePasteRequest {
    pub title: Option<String>,
    pub content: String,
    pub language: Option<String>,
}

impl Paste {
    /// Build a saved record from a create request with a fresh random id.
    ///
    /// # Returns
    /// A new [`Paste`] stamped with the current time.
    pub fn from_request(req: CreatePasteRequest) -> Self {
        Self::with_id(ids::generate_id(), req)
    }

    /// Build a saved record from a create request under a caller-chosen id.
    ///
    /// Blank optional fields are normalized to `None`.
    pub fn with_id(id: String, req: CreatePasteRequest) -> Self {
        Self {
            id,
            title: req.title.filter(|t| !t.trim().is_empty()),
            content: req.content,
            language: req.language.filter(|l| !l.trim().is_empty()),
            created_at: Utc::now(),
        }
    }
}
