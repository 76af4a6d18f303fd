//! Shader compilation and program linking.
//!
//! Stages are GLSL compiled on the CPU with naga so every failure comes back
//! as a status flag plus a bounded info log. Linked programs become wgpu
//! render pipelines.

mod compile;
mod info_log;
mod link;
mod program;

pub use compile::{compile_stage, CompiledStage, ShaderStage};
pub use info_log::{InfoLog, INFO_LOG_CAPACITY};
pub use link::{link, LinkOutcome, StageInterface, ENTRY_POINT};
pub use program::{Program, ProgramSources, ProgramTarget, ShaderError, ShaderPolicy};
