use crate::error::Error;

/// The one triangle this program ever draws: three vertices, tightly
/// packed x/y/z floats in clip space.
pub const TRIANGLE_VERTICES: [f32; 9] = [
    0.0, 0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0,
];

/// Plain metadata record describing how a flat float array splits into
/// vertices. Lives beside the buffer handle, never on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexBufferInfo {
    pub components_per_vertex: u32,
    pub vertex_count: u32,
}

impl VertexBufferInfo {
    /// Metadata for [`TRIANGLE_VERTICES`]: 3 vertices of 3 components.
    pub fn triangle() -> Self {
        Self {
            components_per_vertex: 3,
            vertex_count: 3,
        }
    }

    /// Byte distance between consecutive vertices (tightly packed).
    pub fn stride(&self) -> u64 {
        u64::from(self.components_per_vertex) * std::mem::size_of::<f32>() as u64
    }

    /// Checks that `data_len` floats split evenly into exactly
    /// `vertex_count` vertices.
    pub fn validate(&self, data_len: usize) -> Result<(), Error> {
        let expected = self.components_per_vertex as usize * self.vertex_count as usize;
        if expected != data_len {
            return Err(Error::GeometryMismatch {
                components_per_vertex: self.components_per_vertex,
                vertex_count: self.vertex_count,
                data_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_metadata_matches_the_flat_array() {
        let info = VertexBufferInfo::triangle();
        assert_eq!(info.components_per_vertex, 3);
        assert_eq!(info.vertex_count, 3);
        assert_eq!(
            info.components_per_vertex as usize * info.vertex_count as usize,
            TRIANGLE_VERTICES.len()
        );
        info.validate(TRIANGLE_VERTICES.len()).expect("9 floats fit 3x3");
    }

    #[test]
    fn stride_is_twelve_bytes() {
        assert_eq!(VertexBufferInfo::triangle().stride(), 12);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let info = VertexBufferInfo::triangle();
        let err = info.validate(8).unwrap_err();
        assert!(matches!(
            err,
            Error::GeometryMismatch {
                components_per_vertex: 3,
                vertex_count: 3,
                data_len: 8,
            }
        ));
    }
}
