use super::{Batch, MatrixStack, Shader};

/// Immediate-mode GPU interface the presets draw through.
///
/// The host owns the model-matrix stack, compiles the built-in shaders, and
/// turns a [`Batch`] plus bound uniforms into one draw call against whatever
/// target is current. Errors are host-defined and reach preset callers
/// unchanged.
pub trait GpuHost: MatrixStack {
    /// Texture handle type accepted by sampler uniforms.
    type Texture;

    /// Issues one draw call using the current model matrix.
    fn draw(&mut self, batch: &Batch, shader: &Shader<'_, Self::Texture>) -> anyhow::Result<()>;
}
