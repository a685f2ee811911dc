/// Initialization parameters for [`HeadlessGpu`](super::HeadlessGpu).
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub power_preference: wgpu::PowerPreference,

    /// Allow a software adapter when no hardware adapter is available.
    pub force_fallback_adapter: bool,

    /// Required wgpu features.
    ///
    /// The presets need none; keep this empty for portability.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
        }
    }
}
