#![allow(non_snake_case)]
//! # GlbPress
//!
//! Converts glTF-style scene descriptions that reference resources by name
//! into standard index-addressed glTF documents, and packages them as
//! binary GLB containers.
//!
//! ## Quick Start
//!
//! ### Normalizing a Document
//!
//! ```
//! use glbpress::normalize::{normalize_str, NormalizeOptions};
//!
//! let normalized = normalize_str(
//!     r#"{
//!         "meshes": {"box": {"primitives": []}},
//!         "nodes": {"root": {"meshes": ["box"]}}
//!     }"#,
//!     &NormalizeOptions::default(),
//! )?;
//! assert_eq!(normalized.document.nodes[0].mesh.map(|m| m.raw()), Some(0));
//! # Ok::<(), glbpress::Error>(())
//! ```
//!
//! ### Converting Files
//!
//! ```no_run
//! use std::path::Path;
//! use glbpress::convert::convert_file;
//! use glbpress::normalize::NormalizeOptions;
//! use glbpress::package::GlbPackager;
//!
//! convert_file(
//!     Path::new("json/scene.json"),
//!     Path::new("web/scene.glb"),
//!     &NormalizeOptions::default(),
//!     Path::new("json"),
//!     &GlbPackager,
//! )?;
//! # Ok::<(), glbpress::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `glbpress` command-line binary

pub mod batch;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod normalize;
pub mod package;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::document::{Index, IndexedDocument, NamedDocument, parse_named, read_named};
    pub use crate::normalize::{
        NormalizeOptions, Normalized, ReferencePolicy, UnresolvedReference, normalize,
        normalize_str,
    };
    pub use crate::package::{GlbPackager, Packager};
    pub use crate::config::ConvertConfig;
    pub use crate::convert::{FileReport, convert_file, convert_file_to_gltf};
    pub use crate::batch::{BatchConvertResult, batch_convert, find_source_files, list_packaged};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
