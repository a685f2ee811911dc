use anyhow::Context;
use wgpu::util::DeviceExt;

use crate::coords::{Mat4, Vec2};
use crate::gpu::{Batch, BuiltinShader, GpuHost, MatrixStack, ModelStack, Shader};

use super::layout::{DrawUniforms, VertexLayout};
use super::renderer::PipelineKey;
use super::{GpuTexture, PresetRenderer, RenderCtx, RenderTarget};

/// Per-frame [`GpuHost`] drawing into one color target.
///
/// Every `draw` uploads its own vertex/index/uniform buffers and encodes a
/// separate load/store render pass, so draws composite in call order.
pub struct WgpuHost<'a> {
    renderer: &'a mut PresetRenderer,
    ctx: RenderCtx<'a>,
    target: RenderTarget<'a>,
    projection: Mat4,
    stack: ModelStack,
    draw_calls: usize,
}

impl<'a> WgpuHost<'a> {
    pub(super) fn new(
        renderer: &'a mut PresetRenderer,
        ctx: RenderCtx<'a>,
        target: RenderTarget<'a>,
    ) -> Self {
        if !ctx.viewport.is_valid() {
            log::warn!("WgpuHost: invalid viewport {:?}; projecting as 1x1", ctx.viewport);
        }
        let projection = Mat4::ortho_top_left(ctx.viewport);
        Self { renderer, ctx, target, projection, stack: ModelStack::new(), draw_calls: 0 }
    }

    /// Draw calls issued through this host.
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }
}

impl MatrixStack for WgpuHost<'_> {
    #[inline]
    fn push(&mut self) {
        self.stack.push();
    }

    #[inline]
    fn pop(&mut self) {
        self.stack.pop();
    }

    #[inline]
    fn translate(&mut self, offset: Vec2) {
        self.stack.translate(offset);
    }

    #[inline]
    fn scale(&mut self, factors: Vec2) {
        self.stack.scale(factors);
    }

    #[inline]
    fn depth(&self) -> usize {
        self.stack.depth()
    }

    #[inline]
    fn model_matrix(&self) -> Mat4 {
        self.stack.model_matrix()
    }
}

impl GpuHost for WgpuHost<'_> {
    type Texture = GpuTexture;

    fn draw(&mut self, batch: &Batch, shader: &Shader<'_, GpuTexture>) -> anyhow::Result<()> {
        let builtin = shader.builtin();
        let key = PipelineKey {
            shader: builtin,
            prim: batch.prim(),
            format: self.ctx.target_format,
            layout: VertexLayout::for_shader(builtin, batch.vertices().format())?,
        };

        let color = match builtin {
            BuiltinShader::UniformColor => {
                shader.color().context("UNIFORM_COLOR drawn without a `color` uniform")?
            }
            BuiltinShader::Image => [1.0; 4],
        };

        let vertices = batch.vertices().interleaved()?;
        if batch.element_count() == 0 {
            return Ok(());
        }

        // Mutating methods must happen before borrowing pipeline/layouts immutably.
        self.renderer.ensure_pipeline(&self.ctx, &key);
        self.renderer.ensure_sampler(&self.ctx);

        let device = self.ctx.device;

        let uniforms = DrawUniforms {
            mvp: (self.projection * self.stack.model_matrix()).cols,
            color,
        };
        let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stipple draw ubo"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stipple draw vbo"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = batch.indices().map(|ibo| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("stipple draw ibo"),
                contents: bytemuck::cast_slice(ibo.indices()),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let pipeline = self.renderer.pipeline(&key).context("pipeline was not created")?;
        let bgl = self
            .renderer
            .bind_group_layout(builtin)
            .context("bind group layout was not created")?;

        let bind_group = match builtin {
            BuiltinShader::UniformColor => device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("stipple uniform color bind group"),
                layout: bgl,
                entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
            }),
            BuiltinShader::Image => {
                let texture = shader.image().context("IMAGE drawn without an `image` sampler")?;
                let sampler = self.renderer.sampler().context("sampler was not created")?;
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("stipple image bind group"),
                    layout: bgl,
                    entries: &[
                        wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(texture.view()),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(sampler),
                        },
                    ],
                })
            }
        };

        let mut rpass = self.target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("stipple preset pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        let count = batch.element_count() as u32;
        match &ibo {
            Some(ibo) => {
                rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..count, 0, 0..1);
            }
            None => rpass.draw(0..count, 0..1),
        }
        drop(rpass);

        self.draw_calls += 1;
        Ok(())
    }
}
