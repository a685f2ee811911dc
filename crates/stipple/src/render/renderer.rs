use std::collections::HashMap;

use crate::gpu::{BuiltinShader, PrimType};

use super::layout::{topology, DrawUniforms, VertexLayout};
use super::{RenderCtx, RenderTarget, WgpuHost};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct PipelineKey {
    pub shader: BuiltinShader,
    pub prim: PrimType,
    pub format: wgpu::TextureFormat,
    pub layout: VertexLayout,
}

/// Long-lived GPU state behind [`WgpuHost`].
///
/// Pipelines are created lazily, one per (shader, primitive, target format,
/// vertex layout), and kept for the renderer's lifetime.
#[derive(Default)]
pub struct PresetRenderer {
    modules: HashMap<BuiltinShader, wgpu::ShaderModule>,
    bind_group_layouts: HashMap<BuiltinShader, wgpu::BindGroupLayout>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    sampler: Option<wgpu::Sampler>,
}

impl PresetRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a frame: returns a host that draws into `target`.
    pub fn begin<'a>(&'a mut self, ctx: RenderCtx<'a>, target: RenderTarget<'a>) -> WgpuHost<'a> {
        WgpuHost::new(self, ctx, target)
    }

    /// Number of pipelines created so far.
    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    pub(super) fn pipeline(&self, key: &PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(key)
    }

    pub(super) fn bind_group_layout(&self, shader: BuiltinShader) -> Option<&wgpu::BindGroupLayout> {
        self.bind_group_layouts.get(&shader)
    }

    pub(super) fn sampler(&self) -> Option<&wgpu::Sampler> {
        self.sampler.as_ref()
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    pub(super) fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, key: &PipelineKey) {
        if self.pipelines.contains_key(key) {
            return;
        }

        self.ensure_module(ctx, key.shader);
        self.ensure_bind_group_layout(ctx, key.shader);
        let Some(module) = self.modules.get(&key.shader) else { return };
        let Some(bgl) = self.bind_group_layouts.get(&key.shader) else { return };

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stipple preset pipeline layout"),
            bind_group_layouts: &[bgl],
            immediate_size: 0,
        });

        let attributes = key.layout.wgpu_attributes();
        let (topology, strip_index_format) = topology(key.prim);

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stipple preset pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: key.layout.stride,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: key.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "created {} pipeline for {:?} ({:?}, stride {})",
            key.shader.name(),
            key.prim,
            key.format,
            key.layout.stride
        );
        self.pipelines.insert(key.clone(), pipeline);
    }

    pub(super) fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("stipple image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_module(&mut self, ctx: &RenderCtx<'_>, shader: BuiltinShader) {
        if self.modules.contains_key(&shader) {
            return;
        }
        let (label, source) = match shader {
            BuiltinShader::UniformColor => {
                ("stipple uniform color shader", include_str!("shaders/uniform_color.wgsl"))
            }
            BuiltinShader::Image => ("stipple image shader", include_str!("shaders/image.wgsl")),
        };
        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        self.modules.insert(shader, module);
    }

    fn ensure_bind_group_layout(&mut self, ctx: &RenderCtx<'_>, shader: BuiltinShader) {
        if self.bind_group_layouts.contains_key(&shader) {
            return;
        }

        let uniforms = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<DrawUniforms>() as u64,
                ),
            },
            count: None,
        };

        let layout = match shader {
            BuiltinShader::UniformColor => {
                ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("stipple uniform color bgl"),
                    entries: &[uniforms],
                })
            }
            BuiltinShader::Image => {
                ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("stipple image bgl"),
                    entries: &[
                        uniforms,
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                })
            }
        };
        self.bind_group_layouts.insert(shader, layout);
    }
}
