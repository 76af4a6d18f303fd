use crate::geometry::{GeometryBuffer, VertexArray};
use crate::harness::{FrameCommands, HarnessError, ObjectId, ReleaseLog};
use crate::shader::Program;

use super::SetupCtx;

/// What the harness draws.
///
/// The harness calls `setup` once after the device exists, `record` once per
/// frame, and `release` once at teardown before the device is dropped. The
/// lookups resolve the ids `record` emits to the objects the scene owns.
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Creates the scene's device objects.
    fn setup(&mut self, ctx: &SetupCtx<'_>) -> Result<(), HarnessError> {
        let _ = ctx;
        Ok(())
    }

    /// Appends this frame's draws. Clear and present are added by the harness.
    fn record(&self, frame: &mut FrameCommands) {
        let _ = frame;
    }

    fn program(&self, id: ObjectId) -> Option<&Program> {
        let _ = id;
        None
    }

    fn vertex_array(&self, id: ObjectId) -> Option<&VertexArray> {
        let _ = id;
        None
    }

    fn buffer(&self, id: ObjectId) -> Option<&GeometryBuffer> {
        let _ = id;
        None
    }

    /// Releases every live device object, recording each in `log`.
    fn release(&mut self, log: &mut ReleaseLog) {
        let _ = log;
    }
}
