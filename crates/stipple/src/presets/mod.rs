//! Ready-made 2D drawing helpers.
//!
//! Each preset is a single synchronous call: it builds its geometry from
//! scratch, opens a scoped model transform on the host, and issues exactly
//! one draw. Nothing is cached between calls.

mod circle;
mod texture;

pub use circle::{auto_segments, circle_vertices, draw_circle_2d, draw_circle_2d_with, CircleConfig};
pub use texture::{draw_texture_2d, QUAD_COORDS, QUAD_INDICES};
