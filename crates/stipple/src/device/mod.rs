//! Window-less GPU access.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a surface
//! - offscreen color targets and reading them back to the CPU

mod headless;
mod init;
mod target;

pub use headless::HeadlessGpu;
pub use init::GpuInit;
pub use target::OffscreenTarget;
