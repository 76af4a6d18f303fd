//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The harness translates platform events through `platform::winit`.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
