//! Recording host used by unit tests.

use crate::coords::{Mat4, Vec2};

use super::{Batch, BuiltinShader, GpuHost, MatrixStack, ModelStack, PrimType, Shader};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DrawRecord {
    pub shader: BuiltinShader,
    pub prim: PrimType,
    pub stride: usize,
    pub vertices: Vec<f32>,
    pub indices: Option<Vec<u32>>,
    pub element_count: usize,
    pub model: Mat4,
    pub depth: usize,
    pub color: Option<[f32; 4]>,
    pub image: Option<u32>,
}

impl DrawRecord {
    /// Vertex positions (first two floats of every vertex).
    pub fn positions(&self) -> Vec<[f32; 2]> {
        self.vertices.chunks_exact(self.stride).map(|v| [v[0], v[1]]).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    Push,
    Pop,
    Translate(Vec2),
    Scale(Vec2),
    Draw(DrawRecord),
}

/// Host double that records every call. Textures are plain `u32` ids.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub stack: ModelStack,
    pub events: Vec<Event>,
    pub fail_draws: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail_draws: true, ..Self::default() }
    }

    pub fn draws(&self) -> Vec<&DrawRecord> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Draw(d) => Some(d),
                _ => None,
            })
            .collect()
    }
}

impl MatrixStack for RecordingHost {
    fn push(&mut self) {
        self.events.push(Event::Push);
        self.stack.push();
    }

    fn pop(&mut self) {
        self.events.push(Event::Pop);
        self.stack.pop();
    }

    fn translate(&mut self, offset: Vec2) {
        self.events.push(Event::Translate(offset));
        self.stack.translate(offset);
    }

    fn scale(&mut self, factors: Vec2) {
        self.events.push(Event::Scale(factors));
        self.stack.scale(factors);
    }

    fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn model_matrix(&self) -> Mat4 {
        self.stack.model_matrix()
    }
}

impl GpuHost for RecordingHost {
    type Texture = u32;

    fn draw(&mut self, batch: &Batch, shader: &Shader<'_, u32>) -> anyhow::Result<()> {
        if self.fail_draws {
            anyhow::bail!("device lost");
        }

        let record = DrawRecord {
            shader: shader.builtin(),
            prim: batch.prim(),
            stride: batch.vertices().format().stride(),
            vertices: batch.vertices().interleaved()?.to_vec(),
            indices: batch.indices().map(|i| i.indices().to_vec()),
            element_count: batch.element_count(),
            model: self.stack.model_matrix(),
            depth: self.stack.depth(),
            color: shader.color(),
            image: shader.image().copied(),
        };
        self.events.push(Event::Draw(record));
        Ok(())
    }
}
