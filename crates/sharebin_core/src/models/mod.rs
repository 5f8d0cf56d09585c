//! Data models shared between the store API and the client controller.

/// Paste record and request payloads.
pub mod paste;
