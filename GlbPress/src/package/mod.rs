//! Packaging normalized documents into binary containers
//!
//! [`Packager`] is the seam between normalization and output: it receives a
//! finished [`IndexedDocument`] read-only, plus the directory external
//! buffer URIs are relative to, and returns the complete payload or an
//! error. Nothing is written on failure.

mod glb;
mod sources;

use std::path::Path;

use crate::document::IndexedDocument;
use crate::error::Result;

pub use glb::{GLB_EXTENSION, GlbPackager, merge_buffers, write_glb};
pub use sources::load_buffer;

/// Serializes a normalized document and its binary resources into one payload.
pub trait Packager: Send + Sync {
    /// File extension (without dot) of the produced container.
    fn extension(&self) -> &'static str;

    /// Package `document`, resolving buffer URIs against `resource_dir`.
    ///
    /// # Errors
    /// Returns an error if a buffer source cannot be loaded or the payload
    /// cannot be assembled.
    fn package(&self, document: &IndexedDocument, resource_dir: &Path) -> Result<Vec<u8>>;
}
