//! Vertex data and the state describing how the device reads it.
//!
//! `GeometryBuffer` owns device memory; `VertexArray` is the binding state that
//! pairs a `VertexLayout` with the buffer it reads from.

mod buffer;
mod layout;
mod vertex_array;

pub use buffer::{GeometryBuffer, UsageHint};
pub use layout::{ComponentType, VertexAttribute, VertexLayout};
pub use vertex_array::VertexArray;
