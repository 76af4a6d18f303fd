//! The two drawing variants.

mod clear;
mod triangle;

pub use clear::ClearOnly;
pub use triangle::{
    Triangle, TRIANGLE_COLOR, TRIANGLE_FRAGMENT_SHADER, TRIANGLE_VERTEX_SHADER, TRIANGLE_VERTICES,
};
