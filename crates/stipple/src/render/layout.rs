//! Pure mappings from host-interface types to wgpu descriptors.

use bytemuck::{Pod, Zeroable};

use crate::gpu::{BuiltinShader, PrimType, VertFormat};

/// Per-draw uniform block shared by both built-in shaders (80 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct DrawUniforms {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// One vertex attribute as the pipeline sees it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(super) struct LayoutAttr {
    pub location: u32,
    pub offset: u64,
    pub len: usize,
}

/// Vertex buffer layout of a batch, resolved against a shader's inputs.
///
/// Attributes the shader does not read are skipped; they still occupy space
/// in the stride.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct VertexLayout {
    pub stride: u64,
    pub attrs: Vec<LayoutAttr>,
}

impl VertexLayout {
    pub fn for_shader(shader: BuiltinShader, format: &VertFormat) -> anyhow::Result<Self> {
        let mut attrs = Vec::with_capacity(shader.vertex_inputs().len());

        for (location, input) in shader.vertex_inputs().iter().enumerate() {
            let Some(attr) = format.attrs().iter().find(|a| a.id == input.id) else {
                anyhow::bail!("{} needs vertex attribute `{}`", shader.name(), input.id);
            };
            anyhow::ensure!(
                attr.len == input.len,
                "{} expects `{}` with {} components, batch has {}",
                shader.name(),
                input.id,
                input.len,
                attr.len
            );
            attrs.push(LayoutAttr {
                location: location as u32,
                offset: (attr.offset * std::mem::size_of::<f32>()) as u64,
                len: attr.len,
            });
        }

        Ok(Self { stride: format.stride_bytes(), attrs })
    }

    pub fn wgpu_attributes(&self) -> Vec<wgpu::VertexAttribute> {
        self.attrs
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: float_format(a.len),
                offset: a.offset,
                shader_location: a.location,
            })
            .collect()
    }
}

fn float_format(len: usize) -> wgpu::VertexFormat {
    match len {
        1 => wgpu::VertexFormat::Float32,
        2 => wgpu::VertexFormat::Float32x2,
        3 => wgpu::VertexFormat::Float32x3,
        _ => wgpu::VertexFormat::Float32x4,
    }
}

/// Topology and strip index format for a primitive type.
pub(super) fn topology(prim: PrimType) -> (wgpu::PrimitiveTopology, Option<wgpu::IndexFormat>) {
    match prim {
        PrimType::Points => (wgpu::PrimitiveTopology::PointList, None),
        PrimType::Lines => (wgpu::PrimitiveTopology::LineList, None),
        PrimType::LineStrip => (wgpu::PrimitiveTopology::LineStrip, Some(wgpu::IndexFormat::Uint32)),
        PrimType::Tris => (wgpu::PrimitiveTopology::TriangleList, None),
        PrimType::TriStrip => {
            (wgpu::PrimitiveTopology::TriangleStrip, Some(wgpu::IndexFormat::Uint32))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_size() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 80);
    }

    #[test]
    fn image_layout_resolves_by_name() {
        // Declared in the opposite order from the shader inputs.
        let mut f = VertFormat::new();
        f.attr_add("texCoord", 2).unwrap();
        f.attr_add("pos", 2).unwrap();

        let layout = VertexLayout::for_shader(BuiltinShader::Image, &f).unwrap();
        assert_eq!(layout.stride, 16);
        assert_eq!(
            layout.attrs,
            vec![
                LayoutAttr { location: 0, offset: 8, len: 2 },
                LayoutAttr { location: 1, offset: 0, len: 2 },
            ]
        );

        let attrs = layout.wgpu_attributes();
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(attrs[0].offset, 8);
    }

    #[test]
    fn extra_attributes_are_skipped() {
        let mut f = VertFormat::new();
        f.attr_add("pos", 2).unwrap();
        f.attr_add("weight", 1).unwrap();

        let layout = VertexLayout::for_shader(BuiltinShader::UniformColor, &f).unwrap();
        assert_eq!(layout.stride, 12);
        assert_eq!(layout.attrs.len(), 1);
    }

    #[test]
    fn missing_or_mismatched_attribute_fails() {
        let mut f = VertFormat::new();
        f.attr_add("pos", 2).unwrap();
        let err = VertexLayout::for_shader(BuiltinShader::Image, &f).unwrap_err();
        assert_eq!(err.to_string(), "IMAGE needs vertex attribute `texCoord`");

        let mut f = VertFormat::new();
        f.attr_add("pos", 3).unwrap();
        assert!(VertexLayout::for_shader(BuiltinShader::UniformColor, &f).is_err());
    }

    #[test]
    fn strips_carry_an_index_format() {
        assert_eq!(topology(PrimType::LineStrip).0, wgpu::PrimitiveTopology::LineStrip);
        assert!(topology(PrimType::LineStrip).1.is_some());
        assert!(topology(PrimType::Tris).1.is_none());
    }
}
