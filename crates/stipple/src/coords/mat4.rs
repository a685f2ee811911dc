use core::ops::Mul;

use bytemuck::{Pod, Zeroable};

use super::{Vec2, Viewport};

/// Column-major 4x4 matrix.
///
/// Layout matches WGSL `mat4x4<f32>`, so the value can be written straight
/// into a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn translation(t: Vec2) -> Self {
        Mat4 {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [t.x, t.y, 0.0, 1.0],
            ],
        }
    }

    #[inline]
    pub const fn scale(s: Vec2) -> Self {
        Mat4 {
            cols: [
                [s.x, 0.0, 0.0, 0.0],
                [0.0, s.y, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Orthographic projection from logical pixels (top-left origin, +Y down)
    /// to NDC.
    ///
    /// Degenerate viewports are treated as 1x1 so the matrix stays finite.
    pub fn ortho_top_left(viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Mat4 {
            cols: [
                [2.0 / w, 0.0, 0.0, 0.0],
                [0.0, -2.0 / h, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [-1.0, 1.0, 0.0, 1.0],
            ],
        }
    }

    /// Applies the matrix to `(p.x, p.y, 0, 1)` and returns the xy part.
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let c = &self.cols;
        Vec2::new(
            c[0][0] * p.x + c[1][0] * p.y + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[3][1],
        )
    }
}

impl Default for Mat4 {
    #[inline]
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (c, col) in out.iter_mut().enumerate() {
            for (r, cell) in col.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Mat4 { cols: out }
    }
}
