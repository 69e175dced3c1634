//! Authoring-time, name-addressed scene documents.
//!
//! Every cross-reference in these records is the declaration name of
//! another record. Fields the normalizer does not touch are carried in
//! `fields` in their original order.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::NamedMap;
use crate::error::Result;

/// A scene description whose resources are keyed by unique names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedDocument {
    #[serde(default)]
    pub asset: Option<Map<String, Value>>,
    #[serde(default)]
    pub buffers: NamedMap<NamedBuffer>,
    #[serde(default, rename = "bufferViews")]
    pub buffer_views: NamedMap<NamedBufferView>,
    #[serde(default)]
    pub accessors: NamedMap<NamedAccessor>,
    /// Materials are already in their final shape and pass through as-is.
    #[serde(default)]
    pub materials: NamedMap<Map<String, Value>>,
    #[serde(default)]
    pub meshes: NamedMap<NamedMesh>,
    #[serde(default)]
    pub nodes: NamedMap<NamedNode>,
    #[serde(default)]
    pub scenes: NamedMap<NamedScene>,
    /// Default scene, by name or by position.
    #[serde(default)]
    pub scene: Option<SceneRef>,
    #[serde(default, rename = "extensionsUsed")]
    pub extensions_used: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedBuffer {
    /// Authoring-only buffer type tag (e.g. `"arraybuffer"`).
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedBufferView {
    /// Name of the buffer this view slices.
    pub buffer: String,
    #[serde(default, rename = "byteOffset")]
    pub byte_offset: Option<u64>,
    #[serde(default, rename = "byteStride")]
    pub byte_stride: Option<u64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedAccessor {
    #[serde(default, rename = "bufferView")]
    pub buffer_view: Option<String>,
    /// Element stride; belongs to the bufferView in the output.
    #[serde(default, rename = "byteStride")]
    pub byte_stride: Option<u64>,
    /// Inline name, superseded by the declaration name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedMesh {
    #[serde(default)]
    pub primitives: Option<Vec<NamedPrimitive>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedPrimitive {
    /// Semantic (`POSITION`, `NORMAL`, ...) → accessor name.
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub indices: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedNode {
    #[serde(default)]
    pub meshes: Option<Vec<String>>,
    /// Inline `mesh` value, replaced when `meshes` collapses to one entry.
    #[serde(default)]
    pub mesh: Option<Value>,
    #[serde(default)]
    pub children: Option<Vec<String>>,
    /// Inline name, superseded by the declaration name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedScene {
    /// Root node names. Required.
    pub nodes: Vec<String>,
    /// Inline name, superseded by the declaration name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// The document-level default scene pointer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SceneRef {
    Name(String),
    Index(u64),
}

/// Parse a named document from JSON text.
///
/// # Errors
/// Returns an error if the JSON is malformed or not shaped like a named document.
pub fn parse_named(content: &str) -> Result<NamedDocument> {
    let doc: NamedDocument = serde_json::from_str(content)?;
    Ok(doc)
}

/// Read a named document from disk.
///
/// # Errors
/// Returns an error if the file cannot be read or has invalid JSON.
pub fn read_named<P: AsRef<Path>>(path: P) -> Result<NamedDocument> {
    let content = fs::read_to_string(path)?;
    parse_named(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_carried() {
        let doc = parse_named(
            r#"{
                "accessors": {
                    "acc": {"bufferView": "v", "byteStride": 12, "count": 3, "type": "VEC3"}
                }
            }"#,
        )
        .unwrap();

        let acc = doc.accessors.get("acc").unwrap();
        assert_eq!(acc.buffer_view.as_deref(), Some("v"));
        assert_eq!(acc.byte_stride, Some(12));
        assert_eq!(acc.fields.keys().collect::<Vec<_>>(), ["count", "type"]);
    }

    #[test]
    fn test_scene_without_nodes_is_malformed() {
        let err = parse_named(r#"{"scenes": {"main": {}}}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn test_scene_pointer_forms() {
        let by_name = parse_named(r#"{"scene": "main"}"#).unwrap();
        assert_eq!(by_name.scene, Some(SceneRef::Name("main".to_string())));

        let by_index = parse_named(r#"{"scene": 2}"#).unwrap();
        assert_eq!(by_index.scene, Some(SceneRef::Index(2)));

        let absent = parse_named("{}").unwrap();
        assert_eq!(absent.scene, None);
    }
}
