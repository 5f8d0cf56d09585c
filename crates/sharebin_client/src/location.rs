//! Explicit address-bar model for shareable paste URLs.
//!
//! The controller owns a [`Location`] instead of reading ambient browser
//! state. Navigation swaps the path in place; nothing reload-like happens.

use crate::error::StoreError;

/// Absolute URL split into an origin and a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    base: String,
    path: String,
}

impl Location {
    /// Parse an absolute URL into origin + path.
    ///
    /// # Errors
    /// Returns an error for relative or host-less URLs.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let url = reqwest::Url::parse(raw)
            .map_err(|err| StoreError::InvalidUrl(format!("'{}': {}", raw, err)))?;
        if !url.has_host() {
            return Err(StoreError::InvalidUrl(format!("'{}' has no host", raw)));
        }
        Ok(Self {
            base: url.origin().ascii_serialization(),
            path: url.path().to_string(),
        })
    }

    /// Current path portion, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Swap the path without any reload semantics.
    pub fn navigate(&mut self, path: &str) {
        self.path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
    }

    /// Paste id encoded in the path, if any.
    pub fn paste_id(&self) -> Option<&str> {
        let id = self.path.trim_start_matches('/');
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    /// The URL with the paste-id path segment stripped, for composing
    /// shareable links.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Canonical shareable URL for a saved paste.
    pub fn share_url(&self, id: &str) -> String {
        format!("{}/{}", self.base, id)
    }

    /// Full current URL.
    pub fn href(&self) -> String {
        format!("{}{}", self.base, self.path)
    }
}
