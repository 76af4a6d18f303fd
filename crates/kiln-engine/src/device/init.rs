/// Context creation hints, declared before the window is created.
///
/// Contexts are always core profile with full default limits. The version
/// caps the GLSL dialect accepted by the shader compiler.
#[derive(Debug, Clone)]
pub struct ContextHints {
    pub major: u8,
    pub minor: u8,

    /// Native backends wgpu may pick from.
    pub backends: wgpu::Backends,
}

impl ContextHints {
    /// Profile token as it appears in a GLSL `#version` directive.
    pub const PROFILE: &'static str = "core";

    pub fn core(major: u8, minor: u8) -> Self {
        Self {
            major,
            minor,
            backends: wgpu::Backends::all(),
        }
    }

    /// Highest GLSL `#version` number valid for this context (e.g. 4.5 → 450).
    pub fn glsl_version(&self) -> u32 {
        self.major as u32 * 100 + self.minor as u32 * 10
    }

    pub fn required_limits(&self) -> wgpu::Limits {
        wgpu::Limits::default()
    }
}

impl Default for ContextHints {
    fn default() -> Self {
        Self::core(4, 5)
    }
}

/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: clear and fragment colors are meant to reach the
    /// framebuffer without an sRGB encode.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO waits for vertical sync and is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glsl_version_from_hints() {
        assert_eq!(ContextHints::core(4, 5).glsl_version(), 450);
        assert_eq!(ContextHints::core(3, 3).glsl_version(), 330);
        assert_eq!(ContextHints::core(4, 6).glsl_version(), 460);
    }

    #[test]
    fn default_hints_are_core_4_5() {
        let h = ContextHints::default();
        assert_eq!((h.major, h.minor), (4, 5));
        assert_eq!(ContextHints::PROFILE, "core");
    }

    #[test]
    fn core_requests_full_default_limits() {
        let limits = ContextHints::core(4, 6).required_limits();
        assert_eq!(
            limits.max_texture_dimension_2d,
            wgpu::Limits::default().max_texture_dimension_2d
        );
    }
}
