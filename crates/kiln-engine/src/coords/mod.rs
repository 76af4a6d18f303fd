//! Coordinate and color types shared by the harness and the device layer.
//!
//! Viewports are in physical pixels with the origin at the lower-left corner
//! of the drawable, matching the `(x, y, width, height)` convention of the
//! viewport transform.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
