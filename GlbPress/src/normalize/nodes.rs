//! Node graph stage

use std::collections::HashMap;

use super::meshes::MeshTable;
use super::resolve::{ReferenceKind, ReferenceResolver};
use crate::document::{Index, NamedMap, NamedNode, Node};
use crate::error::Result;

/// Emitted nodes plus the name → index lookup scenes resolve against.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    nodes: Vec<Node>,
    lookup: HashMap<String, usize>,
}

impl NodeTable {
    /// Position of the first emitted node named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// Build the node array.
///
/// Mesh lists collapse to a scalar `mesh` when they hold exactly one name.
/// Children are resolved in a second pass, once every node has an index, so
/// a node may name children declared after it.
///
/// # Errors
/// Returns [`crate::Error::UnresolvedReference`] for an unknown mesh or child
/// under the strict policy.
pub fn resolve_nodes(
    nodes: &NamedMap<NamedNode>,
    meshes: &MeshTable,
    resolver: &mut ReferenceResolver,
) -> Result<NodeTable> {
    let mut table = NodeTable::default();

    for (name, node) in nodes.iter() {
        let referrer = format!("node {name:?}");
        let mut mesh_indices = node
            .meshes
            .iter()
            .flatten()
            .map(|mesh| resolver.resolve(meshes.index_of(mesh), ReferenceKind::Mesh, mesh, &referrer))
            .collect::<Result<Vec<_>>>()?;

        let (mesh, meshes_field) = match mesh_indices.len() {
            0 => (None, None),
            1 => (mesh_indices.pop(), None),
            _ => (None, Some(mesh_indices)),
        };

        let mut fields = node.fields.clone();
        if let (None, Some(inline)) = (mesh, &node.mesh) {
            fields.insert("mesh".to_string(), inline.clone());
        }

        table.lookup.entry(name.to_string()).or_insert(table.nodes.len());
        table.nodes.push(Node {
            name: name.to_string(),
            mesh,
            meshes: meshes_field,
            children: Vec::new(),
            fields,
        });
    }

    for (position, (name, node)) in nodes.iter().enumerate() {
        let referrer = format!("node {name:?}");
        let children = node
            .children
            .iter()
            .flatten()
            .map(|child| resolver.resolve(table.index_of(child), ReferenceKind::Node, child, &referrer))
            .collect::<Result<Vec<Index>>>()?;
        table.nodes[position].children = children;
    }

    tracing::debug!("resolved {} nodes", table.nodes.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{NamedAccessor, NamedBufferView, NamedMesh};
    use crate::normalize::accessors::resolve_accessors;
    use crate::normalize::materials::MaterialTable;
    use crate::normalize::meshes::remap_meshes;
    use crate::normalize::ReferencePolicy;
    use serde_json::json;

    fn mesh_table() -> MeshTable {
        let meshes: NamedMap<NamedMesh> =
            serde_json::from_value(json!({"meshA": {}, "meshB": {}})).unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);
        let accessors = resolve_accessors(
            &NamedMap::<NamedAccessor>::new(),
            &NamedMap::<NamedBufferView>::new(),
            &mut resolver,
        )
        .unwrap();
        remap_meshes(&meshes, &accessors, &MaterialTable::default(), &mut resolver).unwrap()
    }

    #[test]
    fn test_mesh_reference_collapse() {
        let nodes: NamedMap<NamedNode> = serde_json::from_value(json!({
            "single": {"meshes": ["meshB"]},
            "multi": {"meshes": ["meshA", "meshB"]},
            "none": {"meshes": []},
            "bare": {}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let table = resolve_nodes(&nodes, &mesh_table(), &mut resolver).unwrap();

        assert_eq!(
            serde_json::to_value(table.nodes()).unwrap(),
            json!([
                {"name": "single", "mesh": 1},
                {"name": "multi", "meshes": [0, 1]},
                {"name": "none"},
                {"name": "bare"}
            ])
        );
    }

    #[test]
    fn test_inline_mesh_emitted_once() {
        let nodes: NamedMap<NamedNode> = serde_json::from_value(json!({
            "collapsed": {"mesh": "meshB", "meshes": ["meshA"]},
            "kept": {"mesh": 7}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let table = resolve_nodes(&nodes, &mesh_table(), &mut resolver).unwrap();
        let json = serde_json::to_string(table.nodes()).unwrap();

        assert_eq!(
            json,
            r#"[{"name":"collapsed","mesh":0},{"name":"kept","mesh":7}]"#
        );
    }

    #[test]
    fn test_children_resolved_after_all_nodes() {
        let nodes: NamedMap<NamedNode> = serde_json::from_value(json!({
            "root": {"children": ["leaf", "mid"], "name": "ignored"},
            "mid": {"children": []},
            "leaf": {"translation": [1.0, 0.0, 0.0]}
        }))
        .unwrap();
        let mut resolver = ReferenceResolver::new(ReferencePolicy::Strict);

        let table = resolve_nodes(&nodes, &mesh_table(), &mut resolver).unwrap();

        assert_eq!(
            serde_json::to_value(table.nodes()).unwrap(),
            json!([
                {"name": "root", "children": [2, 1]},
                {"name": "mid"},
                {"name": "leaf", "translation": [1.0, 0.0, 0.0]}
            ])
        );
        assert_eq!(table.index_of("leaf"), Some(2));
    }

    #[test]
    fn test_undeclared_child_sentinel() {
        let nodes: NamedMap<NamedNode> =
            serde_json::from_value(json!({"parent": {"children": ["nodeX"]}})).unwrap();

        let mut lenient = ReferenceResolver::new(ReferencePolicy::Lenient);
        let table = resolve_nodes(&nodes, &mesh_table(), &mut lenient).unwrap();
        assert_eq!(
            serde_json::to_value(table.nodes()).unwrap(),
            json!([{"name": "parent", "children": [-1]}])
        );

        let mut strict = ReferenceResolver::new(ReferencePolicy::Strict);
        assert!(resolve_nodes(&nodes, &mesh_table(), &mut strict).is_err());
    }
}
