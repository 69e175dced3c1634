//! Scene stage and the default-scene pointer

use super::nodes::NodeTable;
use super::resolve::{ReferenceKind, ReferenceResolver};
use crate::document::{Index, NamedMap, NamedScene, Scene, SceneRef};
use crate::error::{Error, Result};

/// Emitted scenes and the resolved default scene.
#[derive(Debug, Clone, Default)]
pub struct SceneTable {
    pub scenes: Vec<Scene>,
    /// `None` only when the document declares no scenes and no pointer.
    pub default_scene: Option<Index>,
}

/// Build the scene array and resolve the default-scene pointer.
///
/// A named pointer resolves to the scene's declaration position; an integer
/// pointer must already be a valid position; no pointer means scene `0`.
///
/// # Errors
/// Returns [`Error::UnresolvedReference`] for an unknown node or scene name
/// under the strict policy, or [`Error::SceneIndexOutOfRange`] for an integer
/// pointer past the end of the scene list.
pub fn resolve_scenes(
    scenes: &NamedMap<NamedScene>,
    pointer: Option<&SceneRef>,
    nodes: &NodeTable,
    resolver: &mut ReferenceResolver,
) -> Result<SceneTable> {
    let mut emitted = Vec::with_capacity(scenes.len());
    for (name, scene) in scenes.iter() {
        let referrer = format!("scene {name:?}");
        let roots = scene
            .nodes
            .iter()
            .map(|node| resolver.resolve(nodes.index_of(node), ReferenceKind::Node, node, &referrer))
            .collect::<Result<Vec<_>>>()?;

        emitted.push(Scene {
            name: name.to_string(),
            nodes: roots,
            fields: scene.fields.clone(),
        });
    }

    let default_scene = match pointer {
        Some(SceneRef::Name(name)) => Some(resolver.resolve(
            scenes.position(name),
            ReferenceKind::Scene,
            name,
            "document scene pointer",
        )?),
        Some(SceneRef::Index(index)) => {
            let position = usize::try_from(*index)
                .ok()
                .filter(|position| *position < scenes.len())
                .ok_or(Error::SceneIndexOutOfRange {
                    index: *index,
                    count: scenes.len(),
                })?;
            Some(Index::new(position))
        }
        None if scenes.is_empty() => None,
        None => Some(Index::new(0)),
    };

    tracing::debug!("resolved {} scenes", emitted.len());
    Ok(SceneTable {
        scenes: emitted,
        default_scene,
    })
}
