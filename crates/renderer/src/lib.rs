//! Minimal GPU bootstrap that draws one triangle.
//!
//! The crate wires a winit window, a `wgpu` device, and a fixed
//! vertex/fragment shader pair into a run-once setup sequence:
//!
//! ```text
//!   CLI / firstframe
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop ──▶ render_frame()
//! ```
//!
//! Setup happens exactly once and in a fixed order: acquire a context,
//! compile the shaders, link the program, upload the triangle, configure
//! the clear color, draw. The window then stays open and repaints only
//! when the platform demands it. Every setup failure is fatal: it is
//! surfaced once through the [`AlertSink`] and aborts the sequence.

mod alert;
mod compile;
mod error;
mod geometry;
mod gpu;
mod plan;
mod window;

pub use alert::{AlertSink, TracingAlert};
pub use compile::AttributeBinding;
pub use error::{Error, StageKind};
pub use geometry::{VertexBufferInfo, TRIANGLE_VERTICES};
pub use plan::{DrawCall, FramePlan, VertexBinding, Viewport};

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use window::WindowState;

/// Immutable configuration handed to the renderer at start-up.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Request a validating GPU instance with debug labels.
    pub gpu_debug: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (800, 600),
            gpu_debug: false,
        }
    }
}

/// Entry point that owns the configuration and the alert channel.
pub struct Renderer {
    config: RendererConfig,
    alert: Box<dyn AlertSink>,
}

impl Renderer {
    /// Builds a renderer that reports fatal failures through the log.
    pub fn new(config: RendererConfig) -> Self {
        Self::with_alert_sink(config, Box::new(TracingAlert))
    }

    /// Builds a renderer with a caller-supplied alert channel.
    pub fn with_alert_sink(config: RendererConfig, alert: Box<dyn AlertSink>) -> Self {
        Self { config, alert }
    }

    /// Opens the window, runs the one-time GPU setup, issues the startup
    /// draw, and parks in the event loop until the window closes.
    pub fn run(&mut self) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to initialize event loop")?;
        let window_size = PhysicalSize::new(self.config.surface_size.0, self.config.surface_size.1);
        let window = WindowBuilder::new()
            .with_title("firstframe")
            .with_inner_size(window_size)
            .build(&event_loop)
            .context("failed to create window")?;
        let window = Arc::new(window);

        let mut state = alert::fail_loud(
            self.alert.as_mut(),
            WindowState::new(window.clone(), &self.config),
        )?;

        // The one startup draw; afterwards the window only repaints when
        // the platform asks for it.
        state.window().request_redraw();

        event_loop
            .run(move |event, elwt| {
                elwt.set_control_flow(ControlFlow::Wait);

                let Event::WindowEvent { window_id, event } = event else {
                    return;
                };
                if window_id != state.window().id() {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        elwt.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(new_size);
                    }
                    WindowEvent::ScaleFactorChanged {
                        mut inner_size_writer,
                        ..
                    } => {
                        // Keep the current logical size when the scale factor changes.
                        let _ = inner_size_writer.request_inner_size(state.size());
                    }
                    WindowEvent::RedrawRequested => match state.render_frame() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            state.resize(state.size());
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            tracing::error!("surface out of memory; exiting");
                            elwt.exit();
                        }
                        Err(other) => {
                            tracing::warn!("surface error: {other:?}; skipping frame");
                        }
                    },
                    _ => {}
                }
            })
            .map_err(|err| anyhow!("event loop error: {err}"))
    }
}
