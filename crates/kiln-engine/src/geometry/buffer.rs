use wgpu::util::DeviceExt;

use crate::harness::{ObjectKind, Release};

/// Access pattern declared when the buffer is allocated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UsageHint {
    /// Written once at creation, read by every draw.
    Static,
}

impl UsageHint {
    pub fn buffer_usages(self) -> wgpu::BufferUsages {
        match self {
            UsageHint::Static => wgpu::BufferUsages::VERTEX,
        }
    }
}

/// Vertex data resident in device memory.
pub struct GeometryBuffer {
    buffer: wgpu::Buffer,
}

impl GeometryBuffer {
    /// Allocates a buffer and uploads `data` into it at creation.
    pub fn upload(device: &wgpu::Device, label: &str, data: &[f32], usage: UsageHint) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: usage.buffer_usages(),
        });

        log::debug!("uploaded {label}: {} bytes ({usage:?})", buffer.size());
        Self { buffer }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

impl Release for GeometryBuffer {
    const KIND: ObjectKind = ObjectKind::Buffer;

    fn release(self) {
        self.buffer.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_hint_is_not_writable_after_creation() {
        let usages = UsageHint::Static.buffer_usages();
        assert!(usages.contains(wgpu::BufferUsages::VERTEX));
        assert!(!usages.contains(wgpu::BufferUsages::COPY_DST));
    }
}
