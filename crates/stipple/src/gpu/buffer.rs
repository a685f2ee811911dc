use crate::error::{DrawError, Result};

use super::{PrimType, VertFormat};

/// CPU-side vertex buffer with a fixed vertex count.
///
/// Every attribute of the format must be filled with exactly `len` elements
/// before the buffer can be consumed by a host.
#[derive(Debug, Clone, PartialEq)]
pub struct VertBuf {
    format: VertFormat,
    len: usize,
    data: Vec<f32>,
    filled: Vec<bool>,
}

impl VertBuf {
    pub fn new(format: VertFormat, len: usize) -> Self {
        let data = vec![0.0; format.stride() * len];
        let filled = vec![false; format.attrs().len()];
        Self { format, len, data, filled }
    }

    #[inline]
    pub fn format(&self) -> &VertFormat {
        &self.format
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Writes one attribute for every vertex.
    pub fn attr_fill<const N: usize>(&mut self, attr: usize, values: &[[f32; N]]) -> Result<()> {
        let Some(a) = self.format.attr(attr) else {
            return Err(DrawError::UnknownAttribute(format!("#{attr}")));
        };
        if a.len != N {
            return Err(DrawError::ComponentMismatch { id: a.id.clone(), expected: a.len, got: N });
        }
        if values.len() != self.len {
            return Err(DrawError::VertexCount {
                id: a.id.clone(),
                expected: self.len,
                got: values.len(),
            });
        }

        let stride = self.format.stride();
        let offset = a.offset;
        for (vertex, value) in self.data.chunks_exact_mut(stride).zip(values) {
            vertex[offset..offset + N].copy_from_slice(value);
        }
        self.filled[attr] = true;
        Ok(())
    }

    /// Same as [`attr_fill`](Self::attr_fill), addressed by attribute id.
    pub fn attr_fill_by_id<const N: usize>(&mut self, id: &str, values: &[[f32; N]]) -> Result<()> {
        let attr = self
            .format
            .attr_index(id)
            .ok_or_else(|| DrawError::UnknownAttribute(id.to_owned()))?;
        self.attr_fill(attr, values)
    }

    /// Returns the interleaved vertex data.
    pub fn interleaved(&self) -> Result<&[f32]> {
        if let Some(i) = self.filled.iter().position(|f| !f) {
            return Err(DrawError::UnfilledAttribute(self.format.attrs()[i].id.clone()));
        }
        Ok(&self.data)
    }
}

/// Index list for indexed draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuf {
    prim: PrimType,
    indices: Vec<u32>,
}

impl IndexBuf {
    /// Triangle-list indices, validated against `vertex_len`.
    pub fn triangles(tris: &[[u32; 3]], vertex_len: usize) -> Result<Self> {
        Self::build(PrimType::Tris, tris.iter().flatten().copied(), vertex_len)
    }

    /// Line-list indices, validated against `vertex_len`.
    pub fn lines(lines: &[[u32; 2]], vertex_len: usize) -> Result<Self> {
        Self::build(PrimType::Lines, lines.iter().flatten().copied(), vertex_len)
    }

    fn build(prim: PrimType, indices: impl Iterator<Item = u32>, vertex_len: usize) -> Result<Self> {
        let indices: Vec<u32> = indices.collect();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_len) {
            return Err(DrawError::IndexOutOfRange { index, len: vertex_len });
        }
        Ok(Self { prim, indices })
    }

    #[inline]
    pub fn prim(&self) -> PrimType {
        self.prim
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_uv_format() -> VertFormat {
        let mut f = VertFormat::new();
        f.attr_add("pos", 2).unwrap();
        f.attr_add("texCoord", 2).unwrap();
        f
    }

    #[test]
    fn fill_interleaves_attributes() {
        let mut vbo = VertBuf::new(pos_uv_format(), 2);
        vbo.attr_fill(0, &[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        vbo.attr_fill_by_id("texCoord", &[[0.0, 0.5], [1.0, 0.5]]).unwrap();

        assert_eq!(vbo.interleaved().unwrap(), &[1.0, 2.0, 0.0, 0.5, 3.0, 4.0, 1.0, 0.5]);
    }

    #[test]
    fn unfilled_attribute_blocks_consumption() {
        let mut vbo = VertBuf::new(pos_uv_format(), 1);
        vbo.attr_fill(0, &[[0.0, 0.0]]).unwrap();
        assert!(matches!(vbo.interleaved(), Err(DrawError::UnfilledAttribute(id)) if id == "texCoord"));
    }

    #[test]
    fn fill_rejects_wrong_vertex_count() {
        let mut vbo = VertBuf::new(pos_uv_format(), 3);
        let err = vbo.attr_fill(0, &[[0.0, 0.0]]).unwrap_err();
        assert!(matches!(err, DrawError::VertexCount { expected: 3, got: 1, .. }));
    }

    #[test]
    fn fill_rejects_wrong_width_and_unknown_attr() {
        let mut vbo = VertBuf::new(pos_uv_format(), 1);
        assert!(matches!(
            vbo.attr_fill(0, &[[0.0, 0.0, 0.0]]),
            Err(DrawError::ComponentMismatch { expected: 2, got: 3, .. })
        ));
        assert!(matches!(vbo.attr_fill(7, &[[0.0, 0.0]]), Err(DrawError::UnknownAttribute(_))));
        assert!(matches!(
            vbo.attr_fill_by_id("color", &[[0.0, 0.0]]),
            Err(DrawError::UnknownAttribute(id)) if id == "color"
        ));
    }

    #[test]
    fn index_out_of_range_is_rejected() {
        let err = IndexBuf::triangles(&[[0, 1, 2], [2, 3, 4]], 4).unwrap_err();
        assert!(matches!(err, DrawError::IndexOutOfRange { index: 4, len: 4 }));

        let ibo = IndexBuf::triangles(&[[0, 1, 2], [2, 3, 0]], 4).unwrap();
        assert_eq!(ibo.indices(), &[0, 1, 2, 2, 3, 0]);
        assert_eq!(ibo.prim(), PrimType::Tris);
    }
}
