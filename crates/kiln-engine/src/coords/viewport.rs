/// Viewport rectangle in physical pixels.
///
/// Maps normalized device coordinates onto the drawable. The harness keeps the
/// origin at `(0, 0)` and tracks the framebuffer size through resizes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a `width × height` drawable from the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// A zero-area viewport has nothing to rasterize into (minimized window).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` when the rectangle fits entirely inside a drawable of the
    /// given size. wgpu rejects viewports that extend past the render target.
    #[inline]
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        self.x.saturating_add(self.width) <= width && self.y.saturating_add(self.height) <= height
    }
}
