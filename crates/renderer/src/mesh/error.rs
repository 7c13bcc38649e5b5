use thiserror::Error;

use super::MaterialId;

pub type Result<T> = std::result::Result<T, AwsmMeshError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AwsmMeshError {
    #[error("[mesh] already registered: {0}")]
    DuplicateMesh(String),

    #[error("[mesh] not found: {0}")]
    MeshNotFound(String),

    #[error("[mesh] {0} has no vertices")]
    EmptyVertices(String),

    #[error("[mesh] {id} vertex data length {len} is not a multiple of 3")]
    VertexStride { id: String, len: usize },

    #[error("[mesh] {id} index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        id: String,
        index: u32,
        vertex_count: u32,
    },

    #[error("[mesh] {0} overflows the combined geometry buffers")]
    Overflow(String),

    #[error("[mesh] material not found: {0:?}")]
    MaterialNotFound(MaterialId),
}
