use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{Scene, SetupCtx};
use crate::device::{ContextHints, Gpu, SurfaceBinding, SurfaceErrorAction};
use crate::input::platform::winit::translate_input_event;
use crate::input::InputState;

use super::encode::encode_frame;
use super::resize::{track_framebuffer, ResizeCallback, ResizeHandler};
use super::{
    run_iteration, FrameCommands, FrameSettings, HarnessConfig, HarnessError, HarnessExit,
    Iteration, Lifecycle, ReleaseLog,
};

/// Entry point: opens the window, runs the scene until closed, tears down.
pub struct Harness {
    config: HarnessConfig,
    on_resize: Option<ResizeCallback>,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            on_resize: None,
        }
    }

    /// Replaces the default resize behavior (viewport covers the framebuffer).
    pub fn on_resize<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Viewport, u32, u32) + 'static,
    {
        self.on_resize = Some(Box::new(callback));
        self
    }

    /// Runs `scene` to completion and reports how the run ended.
    ///
    /// Device objects are released before the window and the windowing
    /// system go away, on every path that got as far as creating them.
    pub fn run<S>(self, scene: S) -> HarnessExit
    where
        S: Scene + 'static,
    {
        log::info!("starting '{}' ({})", self.config.title, scene.name());

        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                let err = HarnessError::EventLoop(e.to_string());
                log::error!("{err}");
                return HarnessExit::Failed(err);
            }
        };

        let mut state = HarnessState::new(self.config, self.on_resize, scene);

        if let Err(e) = event_loop.run_app(&mut state) {
            log::error!("event loop terminated with error: {e}");
            if state.failure.is_none() {
                state.failure = Some(HarnessError::EventLoop(e.to_string()));
            }
        }

        state.teardown();
        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,
    resize: ResizeHandler,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct HarnessState<S>
where
    S: Scene + 'static,
{
    config: HarnessConfig,
    on_resize: Option<ResizeCallback>,
    scene: S,

    lifecycle: Lifecycle,
    entry: Option<WindowEntry>,
    commands: FrameCommands,
    frames: u64,

    failure: Option<HarnessError>,
}

impl<S> HarnessState<S>
where
    S: Scene + 'static,
{
    fn new(config: HarnessConfig, on_resize: Option<ResizeCallback>, scene: S) -> Self {
        Self {
            config,
            on_resize,
            scene,
            lifecycle: Lifecycle::new(),
            entry: None,
            commands: FrameCommands::new(),
            frames: 0,
            failure: None,
        }
    }

    /// Window, surface, device, then the scene's objects.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HarnessError> {
        let hints = self.config.hints.clone();
        log::info!(
            "requesting {}.{} {} context",
            hints.major,
            hints.minor,
            ContextHints::PROFILE
        );

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| HarnessError::WindowCreation(e.to_string()))?;

        let callback = self.on_resize.take().unwrap_or_else(track_framebuffer);
        let initial = Viewport::from_size(self.config.width, self.config.height);
        let gpu_init = self.config.gpu.clone();

        let entry = WindowEntryTryBuilder {
            input: InputState::default(),
            resize: ResizeHandler::new(initial, callback),
            window,
            gpu_builder: |w| {
                SurfaceBinding::new(w, &hints)
                    .map_err(|e| HarnessError::WindowCreation(format!("{e:#}")))
                    .and_then(|binding| {
                        pollster::block_on(binding.load(&hints, gpu_init))
                            .map_err(|e| HarnessError::Loader(format!("{e:#}")))
                    })
            },
        }
        .try_build()?;

        let (scene, policy) = (&mut self.scene, self.config.shader_policy);
        entry.with_gpu(|gpu| {
            let ctx = SetupCtx {
                device: gpu.device(),
                queue: gpu.queue(),
                surface_format: gpu.surface_format(),
                hints: &hints,
                shader_policy: policy,
            };
            scene.setup(&ctx)
        })?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    fn redraw(&mut self) {
        let settings = FrameSettings {
            clear_color: self.config.clear_color,
            exit_key: self.config.exit_key,
        };

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        // Split borrows to keep `self` out of the `ouroboros` closures.
        let (lifecycle, scene, commands) = (&mut self.lifecycle, &self.scene, &mut self.commands);

        let iteration =
            entry.with_input(|input| run_iteration(lifecycle, input, &settings, scene, commands));
        if iteration == Iteration::Stopped {
            return;
        }

        let action = entry.with_mut(|fields| {
            submit_frame(fields.gpu, fields.window, fields.resize.viewport(), commands, scene)
        });

        match action {
            Some(SurfaceErrorAction::Fatal) => {
                log::error!("surface lost beyond recovery, closing");
                lifecycle.request_close();
            }
            Some(action) => log::debug!("frame dropped: {action:?}"),
            None => self.frames += 1,
        }
    }

    /// Leaves `Running` when the close flag is set or start-up failed.
    /// Returns `true` if the event loop should stop.
    fn begin_shutdown(&mut self) -> bool {
        if !self.lifecycle.should_close() && self.failure.is_none() {
            return false;
        }
        if self.lifecycle.close() {
            log::debug!("closing");
        }
        true
    }

    /// Releases the scene's device objects, then the surface and window.
    /// Runs once; later calls do nothing.
    fn teardown(&mut self) {
        if !self.lifecycle.terminate() {
            return;
        }

        let mut log = ReleaseLog::new();
        self.scene.release(&mut log);
        log::info!(
            "released {:?} after {} frame(s)",
            log.kinds(),
            self.frames
        );

        self.entry = None;
    }

    fn finish(self) -> HarnessExit {
        match self.failure {
            Some(err) => HarnessExit::Failed(err),
            None => HarnessExit::Closed,
        }
    }
}

/// Acquires a surface texture, encodes the recorded frame and presents it.
///
/// Returns the surface error action when no frame could be acquired.
fn submit_frame(
    gpu: &mut Gpu<'_>,
    window: &Window,
    viewport: Viewport,
    commands: &FrameCommands,
    scene: &dyn Scene,
) -> Option<SurfaceErrorAction> {
    let size = gpu.size();
    if size.width == 0 || size.height == 0 {
        return Some(SurfaceErrorAction::SkipFrame);
    }

    let mut frame = match gpu.begin_frame() {
        Ok(frame) => frame,
        Err(err) => {
            log::warn!("failed to acquire frame: {err}");
            return Some(gpu.handle_surface_error(err));
        }
    };

    let stats = encode_frame(&mut frame, size, viewport, commands, scene);
    log::trace!("frame: {} draw(s), {} skipped", stats.draws, stats.skipped);

    window.pre_present_notify();
    gpu.present(frame);
    None
}

impl<S> ApplicationHandler for HarnessState<S>
where
    S: Scene + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.failure.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("{e}");
            self.failure = Some(e);
            self.begin_shutdown();
            event_loop.exit();
            return;
        }

        self.lifecycle.start();
        log::info!("running");
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.begin_shutdown() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_input_event(&event) {
            entry.with_input_mut(|input| input.apply_event(ev));
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.lifecycle.request_close();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_resize_mut(|r| r.on_resize(new_size.width, new_size.height));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_resize_mut(|r| r.on_resize(new_size.width, new_size.height));
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        if self.begin_shutdown() {
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}
