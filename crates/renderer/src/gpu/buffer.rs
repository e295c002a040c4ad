use wgpu::util::DeviceExt;

use crate::error::Error;
use crate::geometry::VertexBufferInfo;

/// Device-resident copy of the triangle plus the metadata record that
/// describes it. The handle itself carries no extra state.
pub(crate) struct TriangleVertices {
    pub buffer: wgpu::Buffer,
    pub info: VertexBufferInfo,
}

impl TriangleVertices {
    /// Uploads `data` once. The buffer is vertex-only, written at setup
    /// and read by every subsequent draw.
    pub(crate) fn upload(
        device: &wgpu::Device,
        data: &[f32],
        info: VertexBufferInfo,
    ) -> Result<Self, Error> {
        info.validate(data.len())?;

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle vertices"),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self { buffer, info })
    }
}
