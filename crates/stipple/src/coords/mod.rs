//! Coordinate and geometry types shared by the presets and hosts.
//!
//! Canonical CPU space for the bundled wgpu host:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Presets themselves only emit unit-space geometry and model transforms;
//! the host decides how model space maps to the screen.

mod color;
mod mat4;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use mat4::Mat4;
pub use vec2::Vec2;
pub use viewport::Viewport;
