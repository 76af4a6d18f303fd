use crate::coords::ColorRgba;
use crate::device::{ContextHints, GpuInit};
use crate::input::Key;
use crate::shader::ShaderPolicy;

/// Background color both variants clear to.
pub const DEFAULT_CLEAR_COLOR: ColorRgba = ColorRgba::opaque(0.2, 0.3, 0.3);

/// Harness configuration. All values are compile-time defaults; there is no
/// file or command-line layer.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub title: String,
    /// Initial framebuffer width in physical pixels.
    pub width: u32,
    /// Initial framebuffer height in physical pixels.
    pub height: u32,
    pub clear_color: ColorRgba,
    /// Key that requests window closure while held.
    pub exit_key: Key,
    pub hints: ContextHints,
    pub gpu: GpuInit,
    pub shader_policy: ShaderPolicy,
}

impl HarnessConfig {
    pub fn with_hints(mut self, hints: ContextHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_shader_policy(mut self, policy: ShaderPolicy) -> Self {
        self.shader_policy = policy;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            title: "test".to_string(),
            width: 800,
            height: 600,
            clear_color: DEFAULT_CLEAR_COLOR,
            exit_key: Key::Escape,
            hints: ContextHints::default(),
            gpu: GpuInit::default(),
            shader_policy: ShaderPolicy::Advisory,
        }
    }
}
