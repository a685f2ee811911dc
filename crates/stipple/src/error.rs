//! Error types for the drawing presets and the host interface.

use thiserror::Error;

/// Errors produced while building or issuing a preset draw.
///
/// Everything except [`DrawError::Host`] is detected locally, before any
/// GPU work happens. Host failures are carried unchanged.
#[derive(Error, Debug)]
pub enum DrawError {
    /// A caller-supplied argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A vertex attribute with this id already exists in the format.
    #[error("vertex attribute `{0}` is already defined")]
    DuplicateAttribute(String),

    /// Attribute component counts must be within 1..=4.
    #[error("vertex attribute `{id}` has {len} components; expected 1..=4")]
    AttributeWidth { id: String, len: usize },

    /// The referenced attribute does not exist.
    #[error("unknown vertex attribute `{0}`")]
    UnknownAttribute(String),

    /// Fill data does not match the attribute's component count.
    #[error("vertex attribute `{id}` has {expected} components, data has {got}")]
    ComponentMismatch { id: String, expected: usize, got: usize },

    /// Fill data does not match the buffer's vertex count.
    #[error("vertex attribute `{id}` expects {expected} vertices, got {got}")]
    VertexCount { id: String, expected: usize, got: usize },

    /// An attribute was never filled before the buffer was consumed.
    #[error("vertex attribute `{0}` was never filled")]
    UnfilledAttribute(String),

    /// An index refers past the end of the vertex buffer.
    #[error("index {index} is out of range for {len} vertices")]
    IndexOutOfRange { index: u32, len: usize },

    /// The index buffer primitive cannot be drawn as the batch primitive.
    #[error("{index_prim:?} indices cannot be drawn as {prim:?}")]
    PrimitiveMismatch { prim: crate::gpu::PrimType, index_prim: crate::gpu::PrimType },

    /// A shader input was not supplied to `batch_for_shader`.
    #[error("shader {shader} requires vertex attribute `{id}`")]
    MissingAttribute { shader: &'static str, id: String },

    /// The uniform is not declared by the shader, or is of another kind.
    #[error("shader {shader} has no {kind} uniform `{name}`")]
    UnknownUniform { shader: &'static str, kind: &'static str, name: String },

    /// Failure reported by the host GPU layer.
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

/// Result type for preset and host-interface operations.
pub type Result<T> = std::result::Result<T, DrawError>;
