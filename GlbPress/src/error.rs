//! Error types for `GlbPress`

use thiserror::Error;

use crate::normalize::ReferenceKind;

/// The error type for `GlbPress` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDir(String),

    /// Another source in the same batch already maps to this output.
    #[error("output {0} is already produced by another source")]
    DuplicateOutput(String),

    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    // ==================== Input Errors ====================
    /// The input is not valid JSON or not shaped like a named document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    // ==================== Normalization Errors ====================
    /// A named cross-reference has no matching declaration.
    #[error("unresolved {kind} reference: {name:?}")]
    UnresolvedReference {
        /// The kind of resource the reference points at.
        kind: ReferenceKind,
        /// The name that could not be found.
        name: String,
    },

    /// The default-scene pointer is an integer outside the scene list.
    #[error("default scene index {index} out of range ({count} scenes)")]
    SceneIndexOutOfRange {
        /// The declared index.
        index: u64,
        /// Number of declared scenes.
        count: usize,
    },

    /// Stride hints were built against a different bufferView declaration list.
    #[error("stride hints cover {hinted} bufferView declarations, document declares {declared}")]
    StageOrderMismatch {
        /// Declaration count the hints were built for.
        hinted: usize,
        /// Declaration count seen by the bufferView stage.
        declared: usize,
    },

    // ==================== Packaging Errors ====================
    /// A buffer has neither a URI nor an embedded source.
    #[error("buffer {buffer} has no uri to load data from")]
    MissingBufferSource {
        /// Buffer index.
        buffer: usize,
    },

    /// A `data:` URI is not base64-encoded or is missing its payload.
    #[error("invalid data URI on buffer {buffer}")]
    InvalidDataUri {
        /// Buffer index.
        buffer: usize,
    },

    /// Base64 payload of a data URI failed to decode.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Buffer source holds fewer bytes than its declared `byteLength`.
    #[error("buffer {buffer} declares {declared} bytes but its source holds {actual}")]
    BufferTooShort {
        /// Buffer index.
        buffer: usize,
        /// Declared `byteLength`.
        declared: u64,
        /// Bytes available in the source.
        actual: usize,
    },

    /// A bufferView points at a buffer index that does not exist.
    #[error("bufferView {view} references missing buffer {buffer}")]
    UnresolvedBufferIndex {
        /// BufferView index.
        view: usize,
        /// The offending buffer index as emitted.
        buffer: i64,
    },

    /// A bufferView offset overflows once shifted into the merged buffer.
    #[error("bufferView {view} byteOffset overflows the merged buffer")]
    ByteOffsetOverflow {
        /// BufferView index.
        view: usize,
    },

    /// The packaged container would exceed the 32-bit GLB length field.
    #[error("GLB payload too large: {0} bytes")]
    GlbTooLarge(usize),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}

/// A specialized Result type for `GlbPress` operations.
pub type Result<T> = std::result::Result<T, Error>;
