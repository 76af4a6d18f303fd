//! GPU device + surface management.
//!
//! This module is responsible for:
//! - binding a wgpu Surface to the harness window
//! - loading the Adapter/Device/Queue for that surface
//! - configuring the Surface (swapchain) and handing out frames

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame, SurfaceBinding};
pub use surface::SurfaceErrorAction;
pub use init::{ContextHints, GpuInit};
