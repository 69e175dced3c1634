//! Mesh stage

use std::collections::HashMap;

use indexmap::IndexMap;

use super::accessors::ResolvedAccessors;
use super::materials::MaterialTable;
use super::resolve::{ReferenceKind, ReferenceResolver};
use crate::document::{Index, Mesh, NamedMap, NamedMesh, NamedPrimitive, Primitive};
use crate::error::Result;

/// Emitted meshes plus the name → index lookup nodes resolve against.
#[derive(Debug, Clone, Default)]
pub struct MeshTable {
    meshes: Vec<Mesh>,
    lookup: HashMap<String, usize>,
}

impl MeshTable {
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    #[must_use]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    #[must_use]
    pub fn into_meshes(self) -> Vec<Mesh> {
        self.meshes
    }
}

/// Build the mesh array, rewriting primitive attribute, index and material
/// names to positions in the already-emitted accessor and material arrays.
///
/// # Errors
/// Returns [`crate::Error::UnresolvedReference`] for an unknown accessor or
/// material under the strict policy.
pub fn remap_meshes(
    meshes: &NamedMap<NamedMesh>,
    accessors: &ResolvedAccessors,
    materials: &MaterialTable,
    resolver: &mut ReferenceResolver,
) -> Result<MeshTable> {
    let mut table = MeshTable::default();

    for (name, mesh) in meshes.iter() {
        let referrer = format!("mesh {name:?}");
        let primitives = match &mesh.primitives {
            Some(primitives) => Some(
                primitives
                    .iter()
                    .map(|primitive| {
                        remap_primitive(primitive, accessors, materials, resolver, &referrer)
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        table.lookup.insert(name.to_string(), table.meshes.len());
        table.meshes.push(Mesh {
            primitives,
            fields: mesh.fields.clone(),
        });
    }

    tracing::debug!("remapped {} meshes", table.meshes.len());
    Ok(table)
}

fn remap_primitive(
    primitive: &NamedPrimitive,
    accessors: &ResolvedAccessors,
    materials: &MaterialTable,
    resolver: &mut ReferenceResolver,
    referrer: &str,
) -> Result<Primitive> {
    let mut resolve_accessor = |name: &str| -> Result<Index> {
        resolver.resolve(accessors.index_of(name), ReferenceKind::Accessor, name, referrer)
    };

    let attributes = primitive
        .attributes
        .iter()
        .map(|(semantic, accessor)| Ok((semantic.clone(), resolve_accessor(accessor.as_str())?)))
        .collect::<Result<IndexMap<_, _>>>()?;

    let indices = primitive
        .indices
        .as_deref()
        .map(&mut resolve_accessor)
        .transpose()?;

    let material = match primitive.material.as_deref() {
        Some(name) => Some(resolver.resolve(
            materials.index_of(name),
            ReferenceKind::Material,
            name,
            referrer,
        )?),
        None => None,
    };

    Ok(Primitive {
        attributes,
        indices,
        material,
        fields: primitive.fields.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{NamedAccessor, NamedBufferView};
    use crate::normalize::accessors::resolve_accessors;
    use crate::normalize::ReferencePolicy;
    use crate::Error;
    use serde_json::{Map, Value, json};

    fn fixtures() -> (ResolvedAccessors, MaterialTable) {
        let accessors: NamedMap<NamedAccessor> = serde_json::from_value(json!({
            "positions": {"count": 3},
            "normals": {"count": 3},
            "indices": {"count": 3}
        }))
        .unwrap();
        let materials: NamedMap<Map<String, Value>> =
            serde_json::from_value(json!({"m0": {"name": "Paint"}})).unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);
        let accessors =
            resolve_accessors(&accessors, &NamedMap::<NamedBufferView>::new(), &mut resolver)
                .unwrap();
        (accessors, MaterialTable::pass_through(&materials))
    }

    #[test]
    fn test_primitive_references_rewritten() {
        let (accessors, materials) = fixtures();
        let meshes: NamedMap<NamedMesh> = serde_json::from_value(json!({
            "body": {
                "name": "Body",
                "primitives": [{
                    "attributes": {"NORMAL": "normals", "POSITION": "positions"},
                    "indices": "indices",
                    "material": "Paint",
                    "mode": 4
                }]
            },
            "empty": {}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let table = remap_meshes(&meshes, &accessors, &materials, &mut resolver).unwrap();

        assert_eq!(table.index_of("body"), Some(0));
        assert_eq!(table.index_of("empty"), Some(1));
        assert_eq!(
            serde_json::to_value(table.meshes()).unwrap(),
            json!([
                {
                    "primitives": [{
                        "attributes": {"NORMAL": 1, "POSITION": 0},
                        "indices": 2,
                        "material": 0,
                        "mode": 4
                    }],
                    "name": "Body"
                },
                {}
            ])
        );
    }

    #[test]
    fn test_unknown_accessor_is_an_error() {
        let (accessors, materials) = fixtures();
        let meshes: NamedMap<NamedMesh> = serde_json::from_value(json!({
            "m": {"primitives": [{"attributes": {"POSITION": "nowhere"}}]}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let err = remap_meshes(&meshes, &accessors, &materials, &mut resolver).unwrap_err();

        assert!(matches!(
            err,
            Error::UnresolvedReference { kind: ReferenceKind::Accessor, ref name } if name == "nowhere"
        ));
    }

    #[test]
    fn test_unknown_material_lenient() {
        let (accessors, materials) = fixtures();
        let meshes: NamedMap<NamedMesh> = serde_json::from_value(json!({
            "m": {"primitives": [{"attributes": {}, "material": "Chrome"}]}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Lenient);

        let table = remap_meshes(&meshes, &accessors, &materials, &mut resolver).unwrap();

        let primitive = &table.meshes()[0].primitives.as_ref().unwrap()[0];
        assert_eq!(primitive.material, Some(Index::UNRESOLVED));
        assert_eq!(resolver.into_unresolved()[0].kind, ReferenceKind::Material);
    }
}
