use crate::error::{DrawError, Result};

use super::{BuiltinShader, IndexBuf, VertBuf, VertFormat};

/// Primitive assembly mode of a batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrimType {
    Points,
    Lines,
    LineStrip,
    Tris,
    TriStrip,
}

impl PrimType {
    /// Returns true if an index buffer built for `index_prim` can feed this primitive.
    #[inline]
    pub fn accepts_indices(self, index_prim: PrimType) -> bool {
        match self {
            PrimType::Tris | PrimType::TriStrip => index_prim == PrimType::Tris,
            PrimType::Lines | PrimType::LineStrip => index_prim == PrimType::Lines,
            PrimType::Points => true,
        }
    }
}

/// Geometry ready for a single draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    prim: PrimType,
    vbo: VertBuf,
    ibo: Option<IndexBuf>,
}

impl Batch {
    #[inline]
    pub fn new(prim: PrimType, vbo: VertBuf) -> Self {
        Self { prim, vbo, ibo: None }
    }

    pub fn with_indices(prim: PrimType, vbo: VertBuf, ibo: IndexBuf) -> Result<Self> {
        if !prim.accepts_indices(ibo.prim()) {
            return Err(DrawError::PrimitiveMismatch { prim, index_prim: ibo.prim() });
        }
        Ok(Self { prim, vbo, ibo: Some(ibo) })
    }

    #[inline]
    pub fn prim(&self) -> PrimType {
        self.prim
    }

    #[inline]
    pub fn vertices(&self) -> &VertBuf {
        &self.vbo
    }

    #[inline]
    pub fn indices(&self) -> Option<&IndexBuf> {
        self.ibo.as_ref()
    }

    /// Number of elements the draw call consumes (indices if indexed, else vertices).
    #[inline]
    pub fn element_count(&self) -> usize {
        self.ibo.as_ref().map_or(self.vbo.len(), IndexBuf::len)
    }
}

/// Builds a batch whose vertex format matches the inputs `shader` declares.
///
/// `content` maps attribute ids to per-vertex values. Every shader input must
/// be present, unknown ids are rejected, and all lists must share one length.
pub fn batch_for_shader(
    shader: BuiltinShader,
    prim: PrimType,
    content: &[(&str, &[[f32; 2]])],
    indices: Option<&[[u32; 3]]>,
) -> Result<Batch> {
    let mut format = VertFormat::new();
    for input in shader.vertex_inputs() {
        format.attr_add(input.id, input.len)?;
    }

    for (id, _) in content {
        if format.attr_index(id).is_none() {
            return Err(DrawError::UnknownAttribute((*id).to_owned()));
        }
    }

    let len = content.first().map_or(0, |(_, values)| values.len());
    let mut vbo = VertBuf::new(format, len);
    for input in shader.vertex_inputs() {
        let Some((_, values)) = content.iter().find(|(id, _)| *id == input.id) else {
            return Err(DrawError::MissingAttribute {
                shader: shader.name(),
                id: input.id.to_owned(),
            });
        };
        vbo.attr_fill_by_id(input.id, values)?;
    }

    match indices {
        Some(tris) => {
            let ibo = IndexBuf::triangles(tris, len)?;
            Batch::with_indices(prim, vbo, ibo)
        }
        None => Ok(Batch::new(prim, vbo)),
    }
}
