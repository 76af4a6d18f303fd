//! Window lifecycle and frame loop.
//!
//! `Harness::run` owns the event loop: it opens the window, builds the
//! device, lets the scene create its objects, records and submits one frame
//! per iteration until the close flag is set, then tears everything down.

mod config;
mod encode;
mod error;
mod frame;
mod lifecycle;
mod objects;
mod resize;
mod runtime;

pub use config::{HarnessConfig, DEFAULT_CLEAR_COLOR};
pub use error::{HarnessError, HarnessExit};
pub use frame::{run_iteration, FrameCmd, FrameCommands, FrameSettings, Iteration, Topology};
pub use lifecycle::{Lifecycle, Phase};
pub use objects::{DeviceObjects, ObjectId, ObjectKind, ObjectSlot, Release, ReleaseLog};
pub use resize::{track_framebuffer, ResizeCallback, ResizeHandler};
pub use runtime::Harness;
