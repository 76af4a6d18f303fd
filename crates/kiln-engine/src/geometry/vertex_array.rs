use crate::harness::{ObjectId, ObjectKind, Release};

use super::VertexLayout;

/// Vertex-array binding state: a layout and the buffer bound at slot 0.
///
/// The binding is captured when the vertex array is created and stays in place
/// until the vertex array is released.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexArray {
    layout: VertexLayout,
    buffer: Option<ObjectId>,
}

impl VertexArray {
    pub fn new(layout: VertexLayout) -> Self {
        Self { layout, buffer: None }
    }

    /// Binds `buffer` as the source for this layout.
    pub fn bind_buffer(&mut self, buffer: ObjectId) {
        self.buffer = Some(buffer);
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn bound_buffer(&self) -> Option<ObjectId> {
        self.buffer
    }
}

impl Release for VertexArray {
    const KIND: ObjectKind = ObjectKind::VertexArray;

    // Pure CPU-side state; nothing to free on the device.
    fn release(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vertex_array_has_no_buffer() {
        assert_eq!(VertexArray::new(VertexLayout::position3()).bound_buffer(), None);
    }

    #[test]
    fn bind_buffer_is_remembered() {
        let mut va = VertexArray::new(VertexLayout::position3());
        va.bind_buffer(ObjectId(7));
        assert_eq!(va.bound_buffer(), Some(ObjectId(7)));
        assert_eq!(va.layout().stride, 12);
    }
}
