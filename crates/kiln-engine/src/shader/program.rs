use std::borrow::Cow;
use std::fmt;

use crate::device::ContextHints;
use crate::geometry::VertexLayout;
use crate::harness::{ObjectKind, Release};

use super::link::ENTRY_POINT;
use super::{compile_stage, link, CompiledStage, InfoLog, ShaderStage};

/// What to do when a stage fails to compile or the program fails to link.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ShaderPolicy {
    /// Log the diagnostic and keep running with an unusable program.
    /// Draws using it are skipped.
    #[default]
    Advisory,
    /// Abort start-up with a [`ShaderError`].
    Fatal,
}

/// Compile or link failure surfaced under [`ShaderPolicy::Fatal`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderError {
    /// Failing stage; `None` for link failures.
    pub stage: Option<ShaderStage>,
    pub info_log: InfoLog,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "{} shader failed to compile: {}", stage.name(), self.info_log),
            None => write!(f, "shader program failed to link: {}", self.info_log),
        }
    }
}

impl std::error::Error for ShaderError {}

/// GLSL sources of a two-stage program.
#[derive(Debug, Copy, Clone)]
pub struct ProgramSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

/// Target state the program renders into.
#[derive(Debug, Copy, Clone)]
pub struct ProgramTarget<'a> {
    pub device: &'a wgpu::Device,
    pub format: wgpu::TextureFormat,
    pub hints: &'a ContextHints,
}

/// A linked shader program: the render pipeline built from both stages.
///
/// A program whose build failed under the advisory policy holds no pipeline.
pub struct Program {
    pipeline: Option<wgpu::RenderPipeline>,
    info_log: InfoLog,
}

impl Program {
    /// Compiles, links and creates the pipeline.
    ///
    /// The stage modules are dropped once the pipeline exists; only the
    /// pipeline is kept.
    pub fn build(
        target: ProgramTarget<'_>,
        sources: ProgramSources<'_>,
        layout: &VertexLayout,
        policy: ShaderPolicy,
    ) -> Result<Program, ShaderError> {
        let vertex = compile_stage(target.hints, ShaderStage::Vertex, sources.vertex);
        check_stage(&vertex, policy)?;
        let fragment = compile_stage(target.hints, ShaderStage::Fragment, sources.fragment);
        check_stage(&fragment, policy)?;

        let outcome = link(&vertex, &fragment, layout);
        if !outcome.linked() {
            log::error!("shader program link failed: {}", outcome.info_log());
            if policy == ShaderPolicy::Fatal {
                return Err(ShaderError {
                    stage: None,
                    info_log: outcome.info_log().clone(),
                });
            }
            return Ok(Program::unlinked(outcome.info_log().clone()));
        }

        let (Some(vertex), Some(fragment)) = (vertex.into_module(), fragment.into_module()) else {
            return Ok(Program::unlinked(InfoLog::bounded("stage module missing after link")));
        };
        let Some(attributes) = layout.wgpu_attributes() else {
            return Ok(Program::unlinked(InfoLog::bounded("vertex layout has no device format")));
        };

        let device = target.device;
        let vs_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln vertex stage"),
            source: wgpu::ShaderSource::Naga(Cow::Owned(vertex)),
        });
        let fs_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln fragment stage"),
            source: wgpu::ShaderSource::Naga(Cow::Owned(fragment)),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kiln program layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kiln program"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: Some(ENTRY_POINT),
                compilation_options: Default::default(),
                buffers: &[layout.wgpu_layout(&attributes)],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: Some(ENTRY_POINT),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Linked into the pipeline; the standalone stages are no longer needed.
        drop(vs_module);
        drop(fs_module);

        log::info!("shader program linked");
        Ok(Program {
            pipeline: Some(pipeline),
            info_log: InfoLog::empty(),
        })
    }

    pub(crate) fn unlinked(info_log: InfoLog) -> Self {
        Self {
            pipeline: None,
            info_log,
        }
    }

    /// Link status flag.
    pub fn is_linked(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn pipeline(&self) -> Option<&wgpu::RenderPipeline> {
        self.pipeline.as_ref()
    }

    pub fn info_log(&self) -> &InfoLog {
        &self.info_log
    }
}

impl Release for Program {
    const KIND: ObjectKind = ObjectKind::Program;

    fn release(self) {
        drop(self.pipeline);
    }
}

fn check_stage(stage: &CompiledStage, policy: ShaderPolicy) -> Result<(), ShaderError> {
    if stage.compiled() {
        return Ok(());
    }

    log::error!(
        "{} shader failed to compile: {}",
        stage.stage().name(),
        stage.info_log()
    );

    match policy {
        ShaderPolicy::Advisory => Ok(()),
        ShaderPolicy::Fatal => Err(ShaderError {
            stage: Some(stage.stage()),
            info_log: stage.info_log().clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken_vertex() -> CompiledStage {
        compile_stage(
            &ContextHints::core(4, 5),
            ShaderStage::Vertex,
            "#version 450 core\nvoid main() { gl_Position = ; }\n",
        )
    }

    #[test]
    fn advisory_policy_continues_past_compile_failure() {
        let stage = broken_vertex();
        assert!(!stage.compiled());
        assert_eq!(check_stage(&stage, ShaderPolicy::Advisory), Ok(()));
    }

    #[test]
    fn fatal_policy_reports_failing_stage() {
        let err = check_stage(&broken_vertex(), ShaderPolicy::Fatal).unwrap_err();
        assert_eq!(err.stage, Some(ShaderStage::Vertex));
        assert!(!err.info_log.is_empty());
        assert!(err.to_string().starts_with("vertex shader failed to compile"));
    }

    #[test]
    fn unlinked_program_has_no_pipeline() {
        let p = Program::unlinked(InfoLog::bounded("error: nope"));
        assert!(!p.is_linked());
        assert!(p.pipeline().is_none());
        assert_eq!(p.info_log().as_str(), "error: nope");
    }

    #[test]
    fn default_policy_is_advisory() {
        assert_eq!(ShaderPolicy::default(), ShaderPolicy::Advisory);
    }

    #[test]
    fn link_error_display() {
        let err = ShaderError {
            stage: None,
            info_log: InfoLog::bounded("error: x"),
        };
        assert_eq!(err.to_string(), "shader program failed to link: error: x");
    }
}
