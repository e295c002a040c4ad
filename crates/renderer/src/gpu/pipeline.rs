use std::borrow::Cow;

use wgpu::naga::ShaderStage;

use crate::compile::{AttributeBinding, FRAGMENT_SHADER_GLSL, VERTEX_SHADER_GLSL};
use crate::error::{Error, StageKind};
use crate::geometry::VertexBufferInfo;

/// The linked vertex+fragment pair, plus the reflected attribute slot the
/// vertex layout was built around.
pub(crate) struct TriangleProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub attribute: AttributeBinding,
}

impl TriangleProgram {
    /// Builds the render pipeline from the two fixed stages.
    ///
    /// Device-side module creation and pipeline assembly both run under a
    /// validation error scope, so a failure aborts setup with a log
    /// instead of panicking later inside the driver.
    pub(crate) fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        attribute: AttributeBinding,
        info: &VertexBufferInfo,
    ) -> Result<Self, Error> {
        let vertex_module = create_stage_module(device, StageKind::Vertex, VERTEX_SHADER_GLSL)?;
        let fragment_module =
            create_stage_module(device, StageKind::Fragment, FRAGMENT_SHADER_GLSL)?;

        // No uniforms anywhere in this program, so the layout is empty.
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangle pipeline layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let vertex_attributes = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: attribute.location,
        }];
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: info.stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &vertex_attributes,
        };

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(Error::ProgramLinkFailed {
                log: err.to_string(),
            });
        }

        Ok(Self {
            pipeline,
            attribute,
        })
    }
}

fn create_stage_module(
    device: &wgpu::Device,
    stage: StageKind,
    source: &'static str,
) -> Result<wgpu::ShaderModule, Error> {
    let (label, naga_stage) = match stage {
        StageKind::Vertex => ("triangle vertex", ShaderStage::Vertex),
        StageKind::Fragment => ("triangle fragment", ShaderStage::Fragment),
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage: naga_stage,
            defines: &[],
        },
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(Error::ShaderCompileFailed {
            stage,
            log: err.to_string(),
        });
    }

    Ok(module)
}
