use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use crate::error::Error;

/// Adapter candidates tried in order until one yields a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AdapterCandidate {
    /// Full hardware adapter.
    Primary,
    /// Software/conformance fallback for systems with partial support.
    Fallback,
}

pub(crate) const ADAPTER_CANDIDATES: [AdapterCandidate; 2] =
    [AdapterCandidate::Primary, AdapterCandidate::Fallback];

/// Runs `probe` over the candidates in sequence, returning the first hit
/// together with the candidate that produced it.
///
/// Probe failures stay inside the probe; from here they are simply "no
/// adapter from this candidate".
pub(crate) fn select_adapter<A, F>(
    candidates: &[AdapterCandidate],
    mut probe: F,
) -> Option<(AdapterCandidate, A)>
where
    F: FnMut(AdapterCandidate) -> Option<A>,
{
    candidates
        .iter()
        .copied()
        .find_map(|candidate| probe(candidate).map(|adapter| (candidate, adapter)))
}

/// Live connection to the graphics device.
///
/// Created once during setup and held until process exit; nothing is
/// explicitly released.
pub(crate) struct GpuContext {
    /// Kept alive because the surface borrows from it.
    pub _instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl GpuContext {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        gpu_debug: bool,
    ) -> Result<Self, Error>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let flags = if gpu_debug {
            wgpu::InstanceFlags::debugging()
        } else {
            wgpu::InstanceFlags::default()
        };
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags,
            memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
            backend_options: wgpu::BackendOptions::default(),
        });

        let window_handle = target
            .window_handle()
            .map_err(|err| unavailable(format!("failed to acquire window handle: {err}")))?;
        let display_handle = target
            .display_handle()
            .map_err(|err| unavailable(format!("failed to acquire display handle: {err}")))?;

        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle.as_raw(),
                raw_window_handle: window_handle.as_raw(),
            })
        }
        .map_err(|err| unavailable(format!("failed to create rendering surface: {err}")))?;

        let selected = select_adapter(&ADAPTER_CANDIDATES, |candidate| {
            let request = wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: matches!(candidate, AdapterCandidate::Fallback),
            };
            match pollster::block_on(instance.request_adapter(&request)) {
                Ok(adapter) => Some(adapter),
                Err(err) => {
                    tracing::debug!(?candidate, error = %err, "adapter probe failed");
                    None
                }
            }
        });
        let (candidate, adapter) =
            selected.ok_or_else(|| unavailable("no adapter accepted the surface".to_string()))?;

        let info = adapter.get_info();
        tracing::debug!(
            ?candidate,
            name = %info.name,
            backend = ?info.backend,
            device_type = ?info.device_type,
            "selected GPU adapter"
        );

        let limits = adapter.limits();
        let max_dimension = limits.max_texture_dimension_2d;
        let width = initial_size.width.max(1);
        let height = initial_size.height.max(1);
        if width > max_dimension || height > max_dimension {
            return Err(unavailable(format!(
                "GPU max texture dimension is {max_dimension}, requested surface is {width}x{height}"
            )));
        }

        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
                label: Some("firstframe device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            }))
            .map_err(|err| unavailable(format!("failed to create GPU device: {err}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let present_mode = surface_caps
            .present_modes
            .iter()
            .copied()
            .find(|mode| *mode == wgpu::PresentMode::Fifo)
            .unwrap_or(surface_caps.present_modes[0]);

        let size = PhysicalSize::new(width, height);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        tracing::debug!(
            ?surface_format,
            ?present_mode,
            width = size.width,
            height = size.height,
            "configured surface"
        );

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Reconfigures the surface for a new window size.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }
}

fn unavailable(reason: String) -> Error {
    Error::ContextUnavailable { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_capable_probe_never_reaches_the_fallback() {
        let mut probed = Vec::new();
        let selected = select_adapter(&ADAPTER_CANDIDATES, |candidate| {
            probed.push(candidate);
            Some("primary adapter")
        });

        let (candidate, adapter) = selected.unwrap();
        assert_eq!(candidate, AdapterCandidate::Primary);
        assert_eq!(adapter, "primary adapter");
        assert_eq!(probed, vec![AdapterCandidate::Primary]);
    }

    #[test]
    fn fallback_is_used_when_the_primary_probe_fails() {
        let mut probed = Vec::new();
        let selected = select_adapter(&ADAPTER_CANDIDATES, |candidate| {
            probed.push(candidate);
            match candidate {
                AdapterCandidate::Primary => None,
                AdapterCandidate::Fallback => Some("software adapter"),
            }
        });

        let (candidate, adapter) = selected.unwrap();
        assert_eq!(candidate, AdapterCandidate::Fallback);
        assert_eq!(adapter, "software adapter");
        assert_eq!(
            probed,
            vec![AdapterCandidate::Primary, AdapterCandidate::Fallback]
        );
    }

    #[test]
    fn exhausted_candidates_yield_nothing() {
        let mut probed = Vec::new();
        let selected: Option<(AdapterCandidate, ())> =
            select_adapter(&ADAPTER_CANDIDATES, |candidate| {
                probed.push(candidate);
                None
            });

        assert!(selected.is_none());
        assert_eq!(
            probed,
            vec![AdapterCandidate::Primary, AdapterCandidate::Fallback]
        );
    }
}
