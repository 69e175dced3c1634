//! Resolved array positions

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cross-reference resolved to an array position.
///
/// Serializes as a plain JSON integer. [`Index::UNRESOLVED`] (`-1`) is only
/// ever emitted under [`ReferencePolicy::Lenient`](crate::normalize::ReferencePolicy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index(i64);

impl Index {
    /// Sentinel for a name with no matching declaration.
    pub const UNRESOLVED: Index = Index(-1);

    #[must_use]
    pub fn new(position: usize) -> Self {
        Self(position as i64)
    }

    /// The position, or `None` for the sentinel.
    #[must_use]
    pub fn get(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    #[must_use]
    pub fn is_resolved(self) -> bool {
        self.0 >= 0
    }

    /// The value as written to JSON.
    #[must_use]
    pub fn raw(self) -> i64 {
        self.0
    }
}

impl From<usize> for Index {
    fn from(position: usize) -> Self {
        Self::new(position)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
