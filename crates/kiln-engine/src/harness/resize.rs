use crate::coords::Viewport;

/// Called with the new framebuffer size whenever the window is resized.
///
/// Must not block; it runs inside event dispatch.
pub type ResizeCallback = Box<dyn FnMut(&mut Viewport, u32, u32)>;

/// Default callback: the viewport covers the whole framebuffer.
pub fn track_framebuffer() -> ResizeCallback {
    Box::new(|viewport, width, height| *viewport = Viewport::from_size(width, height))
}

/// Viewport plus the callback that keeps it in sync with the window.
pub struct ResizeHandler {
    viewport: Viewport,
    callback: ResizeCallback,
}

impl ResizeHandler {
    pub fn new(initial: Viewport, callback: ResizeCallback) -> Self {
        Self {
            viewport: initial,
            callback,
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        (self.callback)(&mut self.viewport, width, height);
        log::debug!("viewport -> {:?}", self.viewport);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
