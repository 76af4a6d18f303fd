use crate::device::ContextHints;
use crate::shader::{ProgramTarget, ShaderPolicy};

/// Device access handed to `Scene::setup`.
///
/// Valid only for the duration of the call.
pub struct SetupCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub hints: &'a ContextHints,
    pub shader_policy: ShaderPolicy,
}

impl<'a> SetupCtx<'a> {
    /// Target for programs rendering into the window surface.
    pub fn program_target(&self) -> ProgramTarget<'a> {
        ProgramTarget {
            device: self.device,
            format: self.surface_format,
            hints: self.hints,
        }
    }
}
