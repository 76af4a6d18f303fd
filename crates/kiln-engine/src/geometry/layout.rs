use std::mem::size_of;

/// Scalar type of a vertex attribute component.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ComponentType {
    Float32,
}

impl ComponentType {
    #[inline]
    pub const fn size(self) -> u64 {
        match self {
            ComponentType::Float32 => size_of::<f32>() as u64,
        }
    }
}

/// One shader input fed from a vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    /// Shader input location (`layout(location = N)`).
    pub location: u32,
    /// Components per vertex, 1..=4.
    pub components: u32,
    pub component_type: ComponentType,
    /// Fixed-point normalization. Float data is never normalized.
    pub normalized: bool,
    /// Byte offset of the first component inside a vertex.
    pub offset: u64,
}

impl VertexAttribute {
    /// Size of this attribute in bytes.
    #[inline]
    pub const fn size(&self) -> u64 {
        self.components as u64 * self.component_type.size()
    }

    /// Matching wgpu vertex format, if the combination is expressible.
    pub fn format(&self) -> Option<wgpu::VertexFormat> {
        if self.normalized {
            return None;
        }
        match (self.component_type, self.components) {
            (ComponentType::Float32, 1) => Some(wgpu::VertexFormat::Float32),
            (ComponentType::Float32, 2) => Some(wgpu::VertexFormat::Float32x2),
            (ComponentType::Float32, 3) => Some(wgpu::VertexFormat::Float32x3),
            (ComponentType::Float32, 4) => Some(wgpu::VertexFormat::Float32x4),
            _ => None,
        }
    }
}

/// Layout of one interleaved vertex buffer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    /// Bytes between consecutive vertices.
    pub stride: u64,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Tightly packed `vec3` positions at location 0.
    pub fn position3() -> Self {
        let position = VertexAttribute {
            location: 0,
            components: 3,
            component_type: ComponentType::Float32,
            normalized: false,
            offset: 0,
        };

        Self {
            stride: position.size(),
            attributes: vec![position],
        }
    }

    pub fn attribute(&self, location: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.location == location)
    }

    /// Number of whole vertices in `byte_len` bytes of buffer data.
    #[inline]
    pub fn vertex_count(&self, byte_len: u64) -> u32 {
        if self.stride == 0 {
            return 0;
        }
        (byte_len / self.stride) as u32
    }

    /// wgpu attribute descriptors. `None` if any attribute has no wgpu format.
    pub fn wgpu_attributes(&self) -> Option<Vec<wgpu::VertexAttribute>> {
        self.attributes
            .iter()
            .map(|a| {
                a.format().map(|format| wgpu::VertexAttribute {
                    format,
                    offset: a.offset,
                    shader_location: a.location,
                })
            })
            .collect()
    }

    /// Buffer layout borrowing attributes produced by [`wgpu_attributes`](Self::wgpu_attributes).
    pub fn wgpu_layout<'a>(
        &self,
        attributes: &'a [wgpu::VertexAttribute],
    ) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}
