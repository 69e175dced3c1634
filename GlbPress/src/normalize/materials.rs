//! Material passthrough

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::document::NamedMap;

/// Materials in declaration order with the lookups primitives resolve against.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Map<String, Value>>,
    by_name: HashMap<String, usize>,
    by_key: HashMap<String, usize>,
}

impl MaterialTable {
    /// Copy every material unchanged.
    #[must_use]
    pub fn pass_through(materials: &NamedMap<Map<String, Value>>) -> Self {
        let mut table = Self::default();
        for (key, material) in materials.iter() {
            let index = table.materials.len();
            if let Some(name) = material.get("name").and_then(Value::as_str) {
                table.by_name.entry(name.to_string()).or_insert(index);
            }
            table.by_key.insert(key.to_string(), index);
            table.materials.push(material.clone());
        }
        tracing::debug!("passed through {} materials", table.materials.len());
        table
    }

    /// Position of the first material whose `name` field is `name`, falling
    /// back to the material declared under that key.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name
            .get(name)
            .or_else(|| self.by_key.get(name))
            .copied()
    }

    #[must_use]
    pub fn materials(&self) -> &[Map<String, Value>] {
        &self.materials
    }

    #[must_use]
    pub fn into_materials(self) -> Vec<Map<String, Value>> {
        self.materials
    }
}
