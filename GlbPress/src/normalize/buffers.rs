//! Buffer stage

use std::collections::HashMap;

use crate::document::{Buffer, NamedBuffer, NamedMap};

/// Emitted buffers plus the name → index lookup bufferViews resolve against.
#[derive(Debug, Clone, Default)]
pub struct BufferRegistry {
    buffers: Vec<Buffer>,
    lookup: HashMap<String, usize>,
}

impl BufferRegistry {
    /// Register every buffer in declaration order, dropping the authoring
    /// `type` tag.
    #[must_use]
    pub fn build(buffers: &NamedMap<NamedBuffer>) -> Self {
        let mut registry = Self::default();
        for (name, buffer) in buffers.iter() {
            registry.lookup.insert(name.to_string(), registry.buffers.len());
            registry.buffers.push(Buffer {
                fields: buffer.fields.clone(),
            });
        }
        tracing::debug!("registered {} buffers", registry.buffers.len());
        registry
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    #[must_use]
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    #[must_use]
    pub fn into_buffers(self) -> Vec<Buffer> {
        self.buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_tag_removed() {
        let buffers: NamedMap<NamedBuffer> = serde_json::from_value(json!({
            "buf0": {"byteLength": 100, "type": "arraybuffer"},
            "buf1": {"byteLength": 8, "uri": "b.bin"}
        }))
        .unwrap();

        let registry = BufferRegistry::build(&buffers);

        assert_eq!(registry.index_of("buf0"), Some(0));
        assert_eq!(registry.index_of("buf1"), Some(1));
        assert_eq!(registry.index_of("nope"), None);
        assert_eq!(
            serde_json::to_value(registry.buffers()).unwrap(),
            json!([{"byteLength": 100}, {"byteLength": 8, "uri": "b.bin"}])
        );
    }
}
