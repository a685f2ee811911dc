//! wgpu implementation of [`GpuHost`](crate::gpu::GpuHost).
//!
//! [`PresetRenderer`] owns long-lived GPU objects (shader modules, pipelines,
//! bind group layouts, sampler). Each frame it lends them to a [`WgpuHost`],
//! which tracks the model-matrix stack and encodes one render pass per draw.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The vertex shader receives `projection * model` as a single matrix.

mod ctx;
mod host;
mod layout;
mod renderer;
mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use host::WgpuHost;
pub use renderer::PresetRenderer;
pub use texture::GpuTexture;
