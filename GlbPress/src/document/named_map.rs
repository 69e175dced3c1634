//! Declaration-ordered name → record association

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Records keyed by unique names, kept in declaration order.
///
/// Every normalization stage assigns indices by walking one of these maps
/// front to back, so the iteration order is part of the contract: a
/// record's position here is the index it receives in the output. When
/// JSON input repeats a key, the last record wins and the first position
/// is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedMap<T>(IndexMap<String, T>);

impl<T> Default for NamedMap<T> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<T> NamedMap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, or replace the record already declared under `name`
    /// without moving it.
    pub fn insert(&mut self, name: impl Into<String>, record: T) -> Option<T> {
        self.0.insert(name.into(), record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Declaration position of `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.0.get(name)
    }

    /// Iterate `(name, record)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Iterate names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<T, S: Into<String>> FromIterator<(S, T)> for NamedMap<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, record) in iter {
            map.insert(name, record);
        }
        map
    }
}
