//! GPU-facing half of the bootstrap: context, program, buffer, and the
//! clear-and-draw pass.

mod buffer;
mod context;
mod pipeline;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use crate::compile::{self, POSITION_ATTRIBUTE};
use crate::error::{Error, StageKind};
use crate::geometry::{VertexBufferInfo, TRIANGLE_VERTICES};
use crate::plan::FramePlan;

use buffer::TriangleVertices;
use context::GpuContext;
use pipeline::TriangleProgram;

/// Color the pass clears to before the draw.
pub(crate) const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Owns every resource the one-time setup creates.
///
/// Constructing a second `GpuState` against the same window deliberately
/// creates a fresh set of device resources; setup is not re-entrant.
pub(crate) struct GpuState {
    context: GpuContext,
    program: TriangleProgram,
    vertices: TriangleVertices,
    clear_color: wgpu::Color,
}

impl GpuState {
    /// Runs the fixed setup sequence: context acquisition, shader
    /// compilation, program assembly, vertex upload, clear-color
    /// configuration. Any failure aborts the whole sequence.
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        gpu_debug: bool,
    ) -> Result<Self, Error>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size, gpu_debug)?;

        let vertex_ir = compile::compile_stage(StageKind::Vertex, compile::VERTEX_SHADER_GLSL)?;
        compile::compile_stage(StageKind::Fragment, compile::FRAGMENT_SHADER_GLSL)?;
        let attribute = compile::attribute_location(&vertex_ir, POSITION_ATTRIBUTE)?;

        let info = VertexBufferInfo::triangle();
        let program = TriangleProgram::new(&context.device, context.config.format, attribute, &info)?;
        let vertices = TriangleVertices::upload(&context.device, &TRIANGLE_VERTICES, info)?;

        tracing::info!(
            vertex_count = info.vertex_count,
            attribute = %program.attribute.name,
            location = program.attribute.location,
            "GPU setup complete"
        );

        Ok(Self {
            context,
            program,
            vertices,
            clear_color: CLEAR_COLOR,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    /// Records and submits the clear-and-draw pass described by a freshly
    /// built [`FramePlan`].
    pub(crate) fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let plan = FramePlan::new(
            (self.context.config.width, self.context.config.height),
            self.clear_color,
            &self.program.attribute,
            &self.vertices.info,
        );

        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("triangle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(plan.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_viewport(
                0.0,
                0.0,
                plan.viewport.width as f32,
                plan.viewport.height as f32,
                0.0,
                1.0,
            );
            render_pass.set_pipeline(&self.program.pipeline);
            render_pass.set_vertex_buffer(0, self.vertices.buffer.slice(..));
            let first = plan.draw.first_vertex;
            render_pass.draw(first..first + plan.draw.vertex_count, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        tracing::trace!(
            "presented frame size={}x{}",
            plan.viewport.width,
            plan.viewport.height
        );
        Ok(())
    }
}
