//! Index-addressed scene documents, the form GLB packagers accept.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Index;
use crate::error::Result;

/// A scene document whose cross-references are array positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub asset: Map<String, Value>,
    pub buffers: Vec<Buffer>,
    #[serde(rename = "bufferViews")]
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub materials: Vec<Map<String, Value>>,
    pub meshes: Vec<Mesh>,
    pub nodes: Vec<Node>,
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Index>,
    #[serde(default, rename = "extensionsUsed")]
    pub extensions_used: Vec<String>,
}

impl IndexedDocument {
    /// Serialize as pretty-printed `.gltf` JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize as compact JSON bytes.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Buffer {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Buffer {
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.fields.get("uri").and_then(Value::as_str)
    }

    #[must_use]
    pub fn byte_length(&self) -> Option<u64> {
        self.fields.get("byteLength").and_then(Value::as_u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferView {
    pub buffer: Index,
    #[serde(default, rename = "byteOffset", skip_serializing_if = "Option::is_none")]
    pub byte_offset: Option<u64>,
    #[serde(default, rename = "byteStride", skip_serializing_if = "Option::is_none")]
    pub byte_stride: Option<u64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessor {
    #[serde(default, rename = "bufferView", skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<Index>,
    /// Declaration name; meshes look accessors up by it.
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitives: Option<Vec<Primitive>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Primitive {
    #[serde(default)]
    pub attributes: IndexMap<String, Index>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Index>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Index>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Set when exactly one mesh was referenced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Index>,
    /// Set when more than one mesh was referenced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meshes: Option<Vec<Index>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Index>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub nodes: Vec<Index>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
