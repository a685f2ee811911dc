use crate::error::{DrawError, Result};

/// One named float attribute inside a [`VertFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertAttr {
    pub id: String,
    /// Component count (1..=4).
    pub len: usize,
    /// Offset in `f32` units from the start of a vertex.
    pub offset: usize,
}

/// Interleaved vertex layout made of `f32` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertFormat {
    attrs: Vec<VertAttr>,
    stride: usize,
}

impl VertFormat {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute and returns its index.
    pub fn attr_add(&mut self, id: &str, len: usize) -> Result<usize> {
        if !(1..=4).contains(&len) {
            return Err(DrawError::AttributeWidth { id: id.to_owned(), len });
        }
        if self.attr_index(id).is_some() {
            return Err(DrawError::DuplicateAttribute(id.to_owned()));
        }

        self.attrs.push(VertAttr { id: id.to_owned(), len, offset: self.stride });
        self.stride += len;
        Ok(self.attrs.len() - 1)
    }

    #[inline]
    pub fn attr_index(&self, id: &str) -> Option<usize> {
        self.attrs.iter().position(|a| a.id == id)
    }

    #[inline]
    pub fn attr(&self, index: usize) -> Option<&VertAttr> {
        self.attrs.get(index)
    }

    #[inline]
    pub fn attrs(&self) -> &[VertAttr] {
        &self.attrs
    }

    /// Vertex size in `f32` units.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn stride_bytes(&self) -> u64 {
        (self.stride * std::mem::size_of::<f32>()) as u64
    }
}
