use std::fmt;

use thiserror::Error as ThisError;

/// Which half of the shader pair a diagnostic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Every way the one-time setup sequence can fail.
///
/// All variants are fatal: the bootstrap reports the failure once and
/// stops rather than limping on with a half-built pipeline.
#[derive(Debug, ThisError)]
pub enum Error {
    /// No adapter candidate produced a usable context, or the surface or
    /// device could not be created.
    #[error("no usable graphics context: {reason}")]
    ContextUnavailable { reason: String },

    /// A shader stage failed to compile; `log` carries the diagnostic text.
    #[error("{stage} shader failed to compile:\n{log}")]
    ShaderCompileFailed { stage: StageKind, log: String },

    /// The render pipeline could not be assembled from the compiled stages.
    #[error("shader program failed to link:\n{log}")]
    ProgramLinkFailed { log: String },

    /// The vertex stage interface does not expose the expected attribute.
    #[error("vertex stage has no attribute named `{name}`")]
    MissingVertexAttribute { name: String },

    /// The attribute exists but is not the 3-component float vector the
    /// vertex layout assumes.
    #[error("attribute `{name}` is not a vec3 of f32 (found {found})")]
    AttributeTypeMismatch { name: String, found: String },

    /// Vertex metadata does not agree with the flat data length.
    #[error(
        "vertex metadata mismatch: {components_per_vertex} components x {vertex_count} vertices != {data_len} floats"
    )]
    GeometryMismatch {
        components_per_vertex: u32,
        vertex_count: u32,
        data_len: usize,
    },
}
