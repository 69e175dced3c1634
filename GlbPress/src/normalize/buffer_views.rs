//! BufferView stage

use super::accessors::{DeclarationPosition, StrideHints};
use super::buffers::BufferRegistry;
use super::resolve::{ReferenceKind, ReferenceResolver};
use crate::document::{BufferView, NamedBufferView, NamedMap};
use crate::error::{Error, Result};

/// Build the bufferView array in declaration order, resolving buffer names
/// and attaching the strides hoisted off accessors.
///
/// A view with no accessor-contributed stride keeps its own non-zero
/// `byteStride`. A zero stride is never emitted.
///
/// # Errors
/// Returns [`Error::StageOrderMismatch`] if `hints` were built against a
/// different declaration list, or [`Error::UnresolvedReference`] for an
/// unknown buffer name under the strict policy.
pub fn resolve_buffer_views(
    buffer_views: &NamedMap<NamedBufferView>,
    buffers: &BufferRegistry,
    hints: &StrideHints,
    resolver: &mut ReferenceResolver,
) -> Result<Vec<BufferView>> {
    if hints.declared() != buffer_views.len() {
        return Err(Error::StageOrderMismatch {
            hinted: hints.declared(),
            declared: buffer_views.len(),
        });
    }

    let mut emitted = Vec::with_capacity(buffer_views.len());
    for (name, view) in buffer_views.iter() {
        let buffer = resolver.resolve(
            buffers.index_of(&view.buffer),
            ReferenceKind::Buffer,
            &view.buffer,
            &format!("bufferView {name:?}"),
        )?;

        let byte_stride = hints
            .get(DeclarationPosition(emitted.len()))
            .or(view.byte_stride)
            .filter(|stride| *stride != 0);

        emitted.push(BufferView {
            buffer,
            byte_offset: view.byte_offset,
            byte_stride,
            fields: view.fields.clone(),
        });
    }

    tracing::debug!("resolved {} bufferViews", emitted.len());
    Ok(emitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Index, NamedBuffer};
    use crate::normalize::ReferencePolicy;
    use serde_json::json;

    fn registry() -> BufferRegistry {
        let buffers: NamedMap<NamedBuffer> = serde_json::from_value(json!({
            "main": {"byteLength": 64},
            "extra": {"byteLength": 16}
        }))
        .unwrap();
        BufferRegistry::build(&buffers)
    }

    #[test]
    fn test_buffer_names_and_strides() {
        let views: NamedMap<NamedBufferView> = serde_json::from_value(json!({
            "a": {"buffer": "extra", "byteOffset": 0, "byteLength": 16, "target": 34962},
            "b": {"buffer": "main", "byteOffset": 4, "byteLength": 60},
            "c": {"buffer": "main", "byteLength": 4, "byteStride": 0}
        }))
        .unwrap();
        let mut hints = StrideHints::new(3);
        hints.record(DeclarationPosition(0), 12);
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let emitted = resolve_buffer_views(&views, &registry(), &hints, &mut resolver).unwrap();

        assert_eq!(
            serde_json::to_value(&emitted).unwrap(),
            json!([
                {"buffer": 1, "byteOffset": 0, "byteStride": 12, "byteLength": 16, "target": 34962},
                {"buffer": 0, "byteOffset": 4, "byteLength": 60},
                {"buffer": 0, "byteLength": 4}
            ])
        );
    }

    #[test]
    fn test_hints_from_other_document_rejected() {
        let views: NamedMap<NamedBufferView> =
            serde_json::from_value(json!({"a": {"buffer": "main"}})).unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let err = resolve_buffer_views(&views, &registry(), &StrideHints::new(2), &mut resolver)
            .unwrap_err();

        assert!(matches!(err, Error::StageOrderMismatch { hinted: 2, declared: 1 }));
    }

    #[test]
    fn test_unknown_buffer() {
        let views: NamedMap<NamedBufferView> =
            serde_json::from_value(json!({"a": {"buffer": "gone"}})).unwrap();

        let mut strict = ReferenceResolver::new(ReferencePolicy::Strict);
        assert!(matches!(
            resolve_buffer_views(&views, &registry(), &StrideHints::new(1), &mut strict),
            Err(Error::UnresolvedReference { kind: ReferenceKind::Buffer, .. })
        ));

        let mut lenient = ReferenceResolver::new(ReferencePolicy::Lenient);
        let emitted =
            resolve_buffer_views(&views, &registry(), &StrideHints::new(1), &mut lenient).unwrap();
        assert_eq!(emitted[0].buffer, Index::UNRESOLVED);
    }
}
