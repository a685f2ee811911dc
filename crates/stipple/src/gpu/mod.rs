//! Host-side GPU interface used by the presets.
//!
//! This module describes *what* a draw needs (vertex format, buffers, batch,
//! built-in shader and its uniforms, model transform) without committing to a
//! graphics API. A host implements [`GpuHost`]; `crate::render` provides one
//! on top of wgpu.

mod batch;
mod buffer;
mod format;
mod host;
mod matrix;
mod shader;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{batch_for_shader, Batch, PrimType};
pub use buffer::{IndexBuf, VertBuf};
pub use format::{VertAttr, VertFormat};
pub use host::GpuHost;
pub use matrix::{push_pop, MatrixScope, MatrixStack, ModelStack};
pub use shader::{BuiltinShader, Shader, ShaderInput};
