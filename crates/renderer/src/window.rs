use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::Error;
use crate::gpu::GpuState;
use crate::RendererConfig;

/// Ties the platform window to the GPU state behind it.
pub(crate) struct WindowState {
    /// Shared handle to the window; `wgpu` needs it to create the surface.
    window: Arc<Window>,
    gpu: GpuState,
}

impl WindowState {
    /// Runs the full GPU setup against the freshly created window.
    pub(crate) fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self, Error> {
        let size = window.inner_size();
        let gpu = GpuState::new(window.as_ref(), size, config.gpu_debug)?;

        Ok(Self { window, gpu })
    }

    pub(crate) fn window(&self) -> &Window {
        self.window.as_ref()
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    pub(crate) fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.gpu.render_frame()
    }
}
