//! Kiln engine crate.
//!
//! A minimal real-time rendering harness: one window, one surface, a linear
//! bootstrap, a fixed frame loop and an ordered teardown.

pub mod coords;
pub mod core;
pub mod device;
pub mod geometry;
pub mod harness;
pub mod input;
pub mod logging;
pub mod scenes;
pub mod shader;
