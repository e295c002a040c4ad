//! CPU-side compilation of the two fixed shader stages.
//!
//! The sources are parsed and validated with `naga` before any device
//! work happens, so a broken stage aborts setup with a readable
//! diagnostic instead of a deferred device error. The validated vertex
//! module is also what we reflect the attribute location out of.

use wgpu::naga::front::glsl;
use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};
use wgpu::naga::{Binding, Module, ScalarKind, ShaderStage, TypeInner, VectorSize};

use crate::error::{Error, StageKind};

/// Name of the per-vertex position input in the vertex stage.
pub(crate) const POSITION_ATTRIBUTE: &str = "aVertexPosition";

/// Pass-through vertex stage: the attribute becomes the clip-space
/// position unchanged, with w fixed at 1.0.
pub(crate) const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec3 aVertexPosition;

void main() {
    gl_Position = vec4(aVertexPosition, 1.0);
}
";

/// Fragment stage that paints every covered fragment opaque white.
pub(crate) const FRAGMENT_SHADER_GLSL: &str = r"#version 450
precision mediump float;

layout(location = 0) out vec4 outColor;

void main() {
    outColor = vec4(1.0, 1.0, 1.0, 1.0);
}
";

/// A named vertex-stage input slot resolved to its shader location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeBinding {
    pub name: String,
    pub location: u32,
}

fn shader_stage(kind: StageKind) -> ShaderStage {
    match kind {
        StageKind::Vertex => ShaderStage::Vertex,
        StageKind::Fragment => ShaderStage::Fragment,
    }
}

/// Parses and validates one GLSL stage, returning its IR module.
///
/// Any failure carries the rendered diagnostic log; the partially built
/// module is dropped on the error path.
pub(crate) fn compile_stage(kind: StageKind, source: &str) -> Result<Module, Error> {
    let mut frontend = glsl::Frontend::default();
    let module = frontend
        .parse(&glsl::Options::from(shader_stage(kind)), source)
        .map_err(|errors| Error::ShaderCompileFailed {
            stage: kind,
            log: errors.emit_to_string(source),
        })?;

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator
        .validate(&module)
        .map_err(|err| Error::ShaderCompileFailed {
            stage: kind,
            log: err.emit_to_string(source),
        })?;

    Ok(module)
}

/// Looks up the location of a named vertex input, checking that it is the
/// `vec3` of `f32` the vertex layout assumes.
pub(crate) fn attribute_location(module: &Module, name: &str) -> Result<AttributeBinding, Error> {
    let entry = module
        .entry_points
        .iter()
        .find(|entry| entry.stage == ShaderStage::Vertex)
        .ok_or_else(|| Error::MissingVertexAttribute {
            name: name.to_string(),
        })?;

    for argument in &entry.function.arguments {
        if argument.name.as_deref() != Some(name) {
            continue;
        }
        let Some(Binding::Location { location, .. }) = &argument.binding else {
            continue;
        };

        let inner = &module.types[argument.ty].inner;
        let is_vec3_f32 = matches!(
            inner,
            TypeInner::Vector {
                size: VectorSize::Tri,
                scalar,
            } if scalar.kind == ScalarKind::Float && scalar.width == 4
        );
        if !is_vec3_f32 {
            return Err(Error::AttributeTypeMismatch {
                name: name.to_string(),
                found: format!("{inner:?}"),
            });
        }

        return Ok(AttributeBinding {
            name: name.to_string(),
            location: *location,
        });
    }

    Err(Error::MissingVertexAttribute {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sources_compile() {
        compile_stage(StageKind::Vertex, VERTEX_SHADER_GLSL).expect("vertex stage should compile");
        compile_stage(StageKind::Fragment, FRAGMENT_SHADER_GLSL)
            .expect("fragment stage should compile");
    }

    #[test]
    fn invalid_source_reports_stage_and_log() {
        let err = compile_stage(StageKind::Fragment, "void main( {").unwrap_err();
        match err {
            Error::ShaderCompileFailed { stage, log } => {
                assert_eq!(stage, StageKind::Fragment);
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn position_attribute_reflects_at_location_zero() {
        let module = compile_stage(StageKind::Vertex, VERTEX_SHADER_GLSL).unwrap();
        let binding = attribute_location(&module, POSITION_ATTRIBUTE).unwrap();
        assert_eq!(binding.name, POSITION_ATTRIBUTE);
        assert_eq!(binding.location, 0);
    }

    #[test]
    fn unknown_attribute_is_reported() {
        let module = compile_stage(StageKind::Vertex, VERTEX_SHADER_GLSL).unwrap();
        let err = attribute_location(&module, "aMissing").unwrap_err();
        assert!(matches!(err, Error::MissingVertexAttribute { name } if name == "aMissing"));
    }

    #[test]
    fn non_vec3_attribute_is_rejected() {
        let source = r"#version 450
layout(location = 0) in vec2 aVertexPosition;

void main() {
    gl_Position = vec4(aVertexPosition, 0.0, 1.0);
}
";
        let module = compile_stage(StageKind::Vertex, source).unwrap();
        let err = attribute_location(&module, POSITION_ATTRIBUTE).unwrap_err();
        assert!(matches!(err, Error::AttributeTypeMismatch { .. }));
    }
}
