/// Straight-alpha RGBA color with `f32` channels.
///
/// Channels are written to the framebuffer as given; no sRGB conversion is
/// applied by this type.
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

    /// Fully opaque color.
    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::opaque(0.0, 0.0, 0.0)
    }

    /// Clear value for a render pass load op.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_sets_alpha_to_one() {
        let c = ColorRgba::opaque(0.2, 0.3, 0.3);
        assert_eq!(c, ColorRgba::new(0.2, 0.3, 0.3, 1.0));
    }

    #[test]
    fn to_wgpu_widens_channels() {
        let c = ColorRgba::new(1.0, 0.5, 0.25, 0.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 0.5, 0.25, 0.0));
    }
}
