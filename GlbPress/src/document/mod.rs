//! Scene document models
//!
//! - [`NamedDocument`] - authoring input, every resource keyed by name
//! - [`IndexedDocument`] - normalized output, every reference an [`Index`]

mod index;
mod indexed;
mod named;
mod named_map;

pub use index::Index;
pub use indexed::{Accessor, Buffer, BufferView, IndexedDocument, Mesh, Node, Primitive, Scene};
pub use named::{
    NamedAccessor, NamedBuffer, NamedBufferView, NamedDocument, NamedMesh, NamedNode,
    NamedPrimitive, NamedScene, SceneRef, parse_named, read_named,
};
pub use named_map::NamedMap;
