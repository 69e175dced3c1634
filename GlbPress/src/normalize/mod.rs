//! Name-to-index normalization
//!
//! Turns a [`NamedDocument`] into an [`IndexedDocument`] through a fixed
//! sequence of stages. Each stage walks its resources in declaration order
//! and returns an immutable table that later stages resolve names against:
//!
//! 1. asset cleanup
//! 2. buffers → [`BufferRegistry`]
//! 3. accessors → [`ResolvedAccessors`] (+ [`StrideHints`])
//! 4. bufferViews (needs 2 and the hints from 3)
//! 5. materials → [`MaterialTable`]
//! 6. meshes → [`MeshTable`] (needs 3 and 5)
//! 7. nodes → [`NodeTable`] (needs 6)
//! 8. scenes → [`SceneTable`] (needs 7)
//!
//! # Example
//!
//! ```
//! use glbpress::normalize::{normalize_str, NormalizeOptions};
//!
//! let normalized = normalize_str(
//!     r#"{"nodes": {"root": {}}, "scenes": {"main": {"nodes": ["root"]}}, "scene": "main"}"#,
//!     &NormalizeOptions::default(),
//! )?;
//! assert_eq!(normalized.document.scenes[0].nodes[0].get(), Some(0));
//! # Ok::<(), glbpress::Error>(())
//! ```

mod accessors;
mod asset;
mod buffer_views;
mod buffers;
mod materials;
mod meshes;
mod nodes;
mod resolve;
mod scenes;

pub use accessors::{DeclarationPosition, ResolvedAccessors, StrideHints, resolve_accessors};
pub use asset::sanitize_asset;
pub use buffer_views::resolve_buffer_views;
pub use buffers::BufferRegistry;
pub use materials::MaterialTable;
pub use meshes::{MeshTable, remap_meshes};
pub use nodes::{NodeTable, resolve_nodes};
pub use resolve::{ReferenceKind, ReferencePolicy, ReferenceResolver, UnresolvedReference};
pub use scenes::{SceneTable, resolve_scenes};

use crate::document::{IndexedDocument, NamedDocument, parse_named};
use crate::error::Result;

/// Options for a single document transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub references: ReferencePolicy,
}

impl NormalizeOptions {
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            references: ReferencePolicy::Lenient,
        }
    }
}

/// A normalized document and the references that were let through as
/// [`Index::UNRESOLVED`](crate::document::Index::UNRESOLVED).
#[derive(Debug, Clone)]
pub struct Normalized {
    pub document: IndexedDocument,
    pub unresolved: Vec<UnresolvedReference>,
}

/// Normalize a named document.
///
/// # Errors
/// Returns [`crate::Error::UnresolvedReference`] under the strict policy, or
/// [`crate::Error::SceneIndexOutOfRange`] for a bad integer scene pointer.
pub fn normalize(named: &NamedDocument, options: &NormalizeOptions) -> Result<Normalized> {
    let mut resolver = ReferenceResolver::new(options.references);

    let asset = sanitize_asset(named.asset.as_ref());
    let buffers = BufferRegistry::build(&named.buffers);
    let accessors = resolve_accessors(&named.accessors, &named.buffer_views, &mut resolver)?;
    let buffer_views = resolve_buffer_views(
        &named.buffer_views,
        &buffers,
        accessors.stride_hints(),
        &mut resolver,
    )?;
    let materials = MaterialTable::pass_through(&named.materials);
    let meshes = remap_meshes(&named.meshes, &accessors, &materials, &mut resolver)?;
    let nodes = resolve_nodes(&named.nodes, &meshes, &mut resolver)?;
    let scenes = resolve_scenes(&named.scenes, named.scene.as_ref(), &nodes, &mut resolver)?;

    let document = IndexedDocument {
        asset,
        buffers: buffers.into_buffers(),
        buffer_views,
        accessors: accessors.into_accessors(),
        materials: materials.into_materials(),
        meshes: meshes.into_meshes(),
        nodes: nodes.into_nodes(),
        scenes: scenes.scenes,
        scene: scenes.default_scene,
        extensions_used: named.extensions_used.clone(),
    };

    Ok(Normalized {
        document,
        unresolved: resolver.into_unresolved(),
    })
}

/// Parse and normalize a named document from JSON text.
///
/// # Errors
/// Returns [`crate::Error::Json`] for malformed input, otherwise as
/// [`normalize`].
pub fn normalize_str(content: &str, options: &NormalizeOptions) -> Result<Normalized> {
    let named = parse_named(content)?;
    normalize(&named, options)
}
