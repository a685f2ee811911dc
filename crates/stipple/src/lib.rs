//! Stipple: small 2D drawing presets over an immediate-mode GPU host.
//!
//! The presets ([`presets::draw_circle_2d`], [`presets::draw_texture_2d`])
//! are written against the [`gpu::GpuHost`] trait. [`render::WgpuHost`] is
//! the bundled wgpu implementation and [`device`] provides a window-less GPU
//! for offscreen use.

pub mod coords;
pub mod device;
pub mod error;
pub mod gpu;
pub mod logging;
pub mod presets;
pub mod render;

pub use error::{DrawError, Result};
pub use presets::{draw_circle_2d, draw_texture_2d};
