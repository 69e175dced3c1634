//! Name lookups and the unresolved-reference policy

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::Index;
use crate::error::{Error, Result};

/// The kind of resource a cross-reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Buffer,
    BufferView,
    Accessor,
    Material,
    Mesh,
    Node,
    Scene,
}

impl ReferenceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buffer => "buffer",
            Self::BufferView => "bufferView",
            Self::Accessor => "accessor",
            Self::Material => "material",
            Self::Mesh => "mesh",
            Self::Node => "node",
            Self::Scene => "scene",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a name that matches no declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Fail the document with [`Error::UnresolvedReference`].
    #[default]
    Strict,
    /// Emit [`Index::UNRESOLVED`] and record the reference.
    Lenient,
}

/// A reference that was emitted as [`Index::UNRESOLVED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub kind: ReferenceKind,
    pub name: String,
    /// The record holding the reference, e.g. `node "root"`.
    pub referrer: String,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} references unknown {} {:?}", self.referrer, self.kind, self.name)
    }
}

/// Applies a [`ReferencePolicy`] to lookup results and collects the
/// references it let through.
#[derive(Debug)]
pub struct ReferenceResolver {
    policy: ReferencePolicy,
    unresolved: Vec<UnresolvedReference>,
}

impl ReferenceResolver {
    #[must_use]
    pub fn new(policy: ReferencePolicy) -> Self {
        Self {
            policy,
            unresolved: Vec::new(),
        }
    }

    /// Turn a lookup result for `name` into an [`Index`].
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedReference`] when `position` is `None` and the
    /// policy is strict.
    pub fn resolve(
        &mut self,
        position: Option<usize>,
        kind: ReferenceKind,
        name: &str,
        referrer: &str,
    ) -> Result<Index> {
        if let Some(position) = position {
            return Ok(Index::new(position));
        }

        match self.policy {
            ReferencePolicy::Strict => Err(Error::UnresolvedReference {
                kind,
                name: name.to_string(),
            }),
            ReferencePolicy::Lenient => {
                let reference = UnresolvedReference {
                    kind,
                    name: name.to_string(),
                    referrer: referrer.to_string(),
                };
                tracing::warn!("{reference}, emitting {}", Index::UNRESOLVED);
                self.unresolved.push(reference);
                Ok(Index::UNRESOLVED)
            }
        }
    }

    #[must_use]
    pub fn into_unresolved(self) -> Vec<UnresolvedReference> {
        self.unresolved
    }
}
