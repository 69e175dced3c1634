//! Accessor stage
//!
//! Accessors are emitted in declaration order. Each bufferView reference is
//! rewritten to the view's *declaration position*; the bufferView stage
//! later emits views in that same order, which is what lets strides found
//! here be joined onto the right view.

use std::collections::HashMap;

use super::resolve::{ReferenceKind, ReferenceResolver};
use crate::document::{Accessor, NamedAccessor, NamedBufferView, NamedMap};
use crate::error::Result;

/// Position of a bufferView among the named bufferView declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationPosition(pub usize);

/// Strides lifted off accessors, keyed by the bufferView they target.
#[derive(Debug, Clone, Default)]
pub struct StrideHints {
    declared: usize,
    strides: HashMap<DeclarationPosition, u64>,
}

impl StrideHints {
    /// Empty hints for a document declaring `declared` bufferViews.
    #[must_use]
    pub fn new(declared: usize) -> Self {
        Self {
            declared,
            strides: HashMap::new(),
        }
    }

    /// Keep the first non-zero stride seen for `position`.
    pub fn record(&mut self, position: DeclarationPosition, stride: u64) {
        if stride != 0 {
            self.strides.entry(position).or_insert(stride);
        }
    }

    #[must_use]
    pub fn get(&self, position: DeclarationPosition) -> Option<u64> {
        self.strides.get(&position).copied()
    }

    /// Number of bufferView declarations these hints were built against.
    #[must_use]
    pub fn declared(&self) -> usize {
        self.declared
    }
}

/// Output of the accessor stage.
#[derive(Debug, Clone, Default)]
pub struct ResolvedAccessors {
    accessors: Vec<Accessor>,
    stride_hints: StrideHints,
    lookup: HashMap<String, usize>,
}

impl ResolvedAccessors {
    /// Position of the first emitted accessor carrying `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    #[must_use]
    pub fn accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    #[must_use]
    pub fn stride_hints(&self) -> &StrideHints {
        &self.stride_hints
    }

    #[must_use]
    pub fn into_accessors(self) -> Vec<Accessor> {
        self.accessors
    }
}

/// Build the accessor array and collect stride hints.
///
/// # Errors
/// Returns [`crate::Error::UnresolvedReference`] for an unknown bufferView
/// name under the strict policy.
pub fn resolve_accessors(
    accessors: &NamedMap<NamedAccessor>,
    buffer_views: &NamedMap<NamedBufferView>,
    resolver: &mut ReferenceResolver,
) -> Result<ResolvedAccessors> {
    let mut resolved = ResolvedAccessors {
        accessors: Vec::with_capacity(accessors.len()),
        stride_hints: StrideHints::new(buffer_views.len()),
        lookup: HashMap::new(),
    };

    for (name, accessor) in accessors.iter() {
        let referrer = format!("accessor {name:?}");

        let buffer_view = match accessor.buffer_view.as_deref() {
            Some(view_name) => Some(resolver.resolve(
                buffer_views.position(view_name),
                ReferenceKind::BufferView,
                view_name,
                &referrer,
            )?),
            None => None,
        };

        if let (Some(position), Some(stride)) =
            (buffer_view.and_then(|view| view.get()), accessor.byte_stride)
        {
            resolved
                .stride_hints
                .record(DeclarationPosition(position), stride);
        }

        resolved
            .lookup
            .entry(name.to_string())
            .or_insert(resolved.accessors.len());
        resolved.accessors.push(Accessor {
            buffer_view,
            name: name.to_string(),
            fields: accessor.fields.clone(),
        });
    }

    tracing::debug!("resolved {} accessors", resolved.accessors.len());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Index;
    use crate::normalize::ReferencePolicy;
    use serde_json::json;

    fn views(names: &[&str]) -> NamedMap<NamedBufferView> {
        names
            .iter()
            .map(|name| {
                let view: NamedBufferView =
                    serde_json::from_value(json!({"buffer": "buf"})).unwrap();
                (*name, view)
            })
            .collect()
    }

    #[test]
    fn test_first_nonzero_stride_wins() {
        let accessors: NamedMap<NamedAccessor> = serde_json::from_value(json!({
            "zero": {"bufferView": "v1", "byteStride": 0},
            "twelve": {"bufferView": "v1", "byteStride": 12},
            "sixteen": {"bufferView": "v1", "byteStride": 16},
            "other": {"bufferView": "v0"}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let resolved = resolve_accessors(&accessors, &views(&["v0", "v1"]), &mut resolver).unwrap();

        assert_eq!(resolved.stride_hints().get(DeclarationPosition(1)), Some(12));
        assert_eq!(resolved.stride_hints().get(DeclarationPosition(0)), None);
        assert_eq!(resolved.stride_hints().declared(), 2);
        assert_eq!(resolved.accessors()[3].buffer_view, Some(Index::new(0)));
    }

    #[test]
    fn test_name_recorded_and_stride_removed() {
        let accessors: NamedMap<NamedAccessor> = serde_json::from_value(json!({
            "pos": {"bufferView": "v0", "byteStride": 12, "name": "inline", "count": 3}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let resolved = resolve_accessors(&accessors, &views(&["v0"]), &mut resolver).unwrap();

        assert_eq!(
            serde_json::to_value(resolved.accessors()).unwrap(),
            json!([{"bufferView": 0, "name": "pos", "count": 3}])
        );
        assert_eq!(resolved.index_of("pos"), Some(0));
    }

    #[test]
    fn test_accessor_without_view_passes_through() {
        let accessors: NamedMap<NamedAccessor> = serde_json::from_value(json!({
            "sparse": {"count": 4, "byteStride": 8}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let resolved = resolve_accessors(&accessors, &views(&[]), &mut resolver).unwrap();

        assert_eq!(
            serde_json::to_value(resolved.accessors()).unwrap(),
            json!([{"name": "sparse", "count": 4}])
        );
    }

    #[test]
    fn test_unknown_view_under_lenient_policy() {
        let accessors: NamedMap<NamedAccessor> = serde_json::from_value(json!({
            "a": {"bufferView": "missing", "byteStride": 4}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Lenient);

        let resolved = resolve_accessors(&accessors, &views(&["v0"]), &mut resolver).unwrap();

        assert_eq!(resolved.accessors()[0].buffer_view, Some(Index::UNRESOLVED));
        assert_eq!(resolved.stride_hints().get(DeclarationPosition(0)), None);
        assert_eq!(resolver.into_unresolved().len(), 1);
    }
}
