/// Straight-alpha RGBA color, components in `[0, 1]`.
///
/// This is the value handed to the uniform-color shader as-is; no
/// premultiplication or color-space conversion happens on the CPU side.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Creates a color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<ColorRgba> for wgpu::Color {
    #[inline]
    fn from(c: ColorRgba) -> Self {
        wgpu::Color { r: c.r as f64, g: c.g as f64, b: c.b as f64, a: c.a as f64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u8_normalizes_channels() {
        assert_eq!(ColorRgba::from_u8(255, 0, 51, 255), ColorRgba::new(1.0, 0.0, 0.2, 1.0));
        assert_eq!(ColorRgba::from_u8(0, 0, 0, 255), ColorRgba::black());
    }
}
