use crate::coords::ColorRgba;
use crate::core::Scene;
use crate::input::{InputState, Key, KeyState};

use super::{Lifecycle, ObjectId};

/// Primitive assembly mode of a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    /// Every three vertices form one triangle.
    Triangles,
}

/// One step of a recorded frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameCmd {
    /// Clear the color buffer.
    Clear(ColorRgba),
    /// Make a program current.
    UseProgram(ObjectId),
    /// Make a vertex array (and the buffer it reads from) current.
    BindVertexArray(ObjectId),
    /// Draw `count` vertices starting at `first` with the current state.
    DrawArrays {
        topology: Topology,
        first: u32,
        count: u32,
    },
    /// Swap the back buffer to the screen.
    Present,
}

/// Commands recorded for a single frame, in submission order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameCommands {
    cmds: Vec<FrameCmd>,
}

impl FrameCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the list, keeping its allocation.
    pub fn reset(&mut self) {
        self.cmds.clear();
    }

    pub fn push(&mut self, cmd: FrameCmd) {
        self.cmds.push(cmd);
    }

    pub fn use_program(&mut self, id: ObjectId) {
        self.push(FrameCmd::UseProgram(id));
    }

    pub fn bind_vertex_array(&mut self, id: ObjectId) {
        self.push(FrameCmd::BindVertexArray(id));
    }

    pub fn draw_arrays(&mut self, topology: Topology, first: u32, count: u32) {
        self.push(FrameCmd::DrawArrays {
            topology,
            first,
            count,
        });
    }

    pub fn as_slice(&self) -> &[FrameCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Color of the first clear in the frame, if any.
    pub fn clear_color(&self) -> Option<ColorRgba> {
        self.cmds.iter().find_map(|c| match c {
            FrameCmd::Clear(color) => Some(*color),
            _ => None,
        })
    }

    pub fn draw_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, FrameCmd::DrawArrays { .. }))
            .count()
    }

    pub fn presents(&self) -> bool {
        self.cmds.last() == Some(&FrameCmd::Present)
    }
}

/// Per-frame settings taken from the harness configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameSettings {
    pub clear_color: ColorRgba,
    pub exit_key: Key,
}

/// Outcome of one frame-loop iteration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Iteration {
    /// A frame was recorded and should be submitted.
    Recorded,
    /// The close flag was set; the loop is over and nothing was recorded.
    Stopped,
}

/// Runs one iteration of the frame loop: close check, input poll, clear,
/// scene draws, present.
///
/// Holding the exit key requests closure; the frame being recorded still
/// completes and the loop stops at the next iteration.
pub fn run_iteration(
    lifecycle: &mut Lifecycle,
    input: &InputState,
    settings: &FrameSettings,
    scene: &dyn Scene,
    out: &mut FrameCommands,
) -> Iteration {
    out.reset();

    if !lifecycle.begin_iteration() {
        return Iteration::Stopped;
    }

    if input.key_state(settings.exit_key) == KeyState::Pressed {
        log::info!("{:?} held, closing", settings.exit_key);
        lifecycle.request_close();
    }

    out.push(FrameCmd::Clear(settings.clear_color));
    scene.record(out);
    out.push(FrameCmd::Present);

    Iteration::Recorded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::Phase;
    use crate::input::InputEvent;

    struct DrawsThree;

    impl Scene for DrawsThree {
        fn name(&self) -> &'static str {
            "draws-three"
        }

        fn record(&self, frame: &mut FrameCommands) {
            frame.use_program(ObjectId(1));
            frame.bind_vertex_array(ObjectId(1));
            frame.draw_arrays(Topology::Triangles, 0, 3);
        }
    }

    struct Empty;

    impl Scene for Empty {
        fn name(&self) -> &'static str {
            "empty"
        }
    }

    fn settings() -> FrameSettings {
        FrameSettings {
            clear_color: ColorRgba::opaque(0.2, 0.3, 0.3),
            exit_key: Key::Escape,
        }
    }

    fn running() -> Lifecycle {
        let mut lc = Lifecycle::new();
        lc.start();
        lc
    }

    fn press(input: &mut InputState, key: Key) {
        input.apply_event(InputEvent::Key {
            key,
            state: KeyState::Pressed,
        });
    }

    // ── recording ─────────────────────────────────────────────────────────

    #[test]
    fn frame_is_clear_draws_present() {
        let mut lc = running();
        let mut out = FrameCommands::new();
        let it = run_iteration(&mut lc, &InputState::default(), &settings(), &DrawsThree, &mut out);

        assert_eq!(it, Iteration::Recorded);
        assert_eq!(
            out.as_slice(),
            &[
                FrameCmd::Clear(ColorRgba::new(0.2, 0.3, 0.3, 1.0)),
                FrameCmd::UseProgram(ObjectId(1)),
                FrameCmd::BindVertexArray(ObjectId(1)),
                FrameCmd::DrawArrays {
                    topology: Topology::Triangles,
                    first: 0,
                    count: 3
                },
                FrameCmd::Present,
            ]
        );
    }

    #[test]
    fn clear_only_scene_records_no_draws() {
        let mut lc = running();
        let mut out = FrameCommands::new();
        run_iteration(&mut lc, &InputState::default(), &settings(), &Empty, &mut out);

        assert_eq!(out.draw_count(), 0);
        assert_eq!(out.clear_color(), Some(ColorRgba::opaque(0.2, 0.3, 0.3)));
        assert!(out.presents());
    }

    #[test]
    fn repeated_iterations_do_not_accumulate() {
        let mut lc = running();
        let mut out = FrameCommands::new();
        for _ in 0..5 {
            run_iteration(&mut lc, &InputState::default(), &settings(), &DrawsThree, &mut out);
        }
        assert_eq!(out.as_slice().len(), 5);
        assert_eq!(out.draw_count(), 1);
    }

    // ── closing ───────────────────────────────────────────────────────────

    #[test]
    fn exit_key_closes_after_the_current_frame() {
        let mut lc = running();
        let mut input = InputState::default();
        press(&mut input, Key::Escape);
        let mut out = FrameCommands::new();

        assert_eq!(
            run_iteration(&mut lc, &input, &settings(), &DrawsThree, &mut out),
            Iteration::Recorded
        );
        assert!(lc.should_close());
        assert!(out.presents());

        assert_eq!(
            run_iteration(&mut lc, &input, &settings(), &DrawsThree, &mut out),
            Iteration::Stopped
        );
        assert!(out.is_empty());
        assert_eq!(lc.phase(), Phase::Closing);
    }

    #[test]
    fn other_keys_do_not_close() {
        let mut lc = running();
        let mut input = InputState::default();
        press(&mut input, Key::Unknown(57));
        press(&mut input, Key::Unknown(16));
        let mut out = FrameCommands::new();

        run_iteration(&mut lc, &input, &settings(), &Empty, &mut out);
        assert!(!lc.should_close());
    }

    #[test]
    fn window_close_stops_before_recording() {
        let mut lc = running();
        lc.request_close();
        let mut out = FrameCommands::new();
        out.push(FrameCmd::Present);

        let it = run_iteration(&mut lc, &InputState::default(), &settings(), &DrawsThree, &mut out);
        assert_eq!(it, Iteration::Stopped);
        assert!(out.is_empty());
    }

    #[test]
    fn nothing_recorded_before_start() {
        let mut lc = Lifecycle::new();
        let mut out = FrameCommands::new();
        let it = run_iteration(&mut lc, &InputState::default(), &settings(), &DrawsThree, &mut out);
        assert_eq!(it, Iteration::Stopped);
    }
}
