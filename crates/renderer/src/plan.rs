//! Plain-data description of the single clear-and-draw pass.

use crate::compile::AttributeBinding;
use crate::geometry::VertexBufferInfo;

/// Pixel rectangle the pass renders into, queried fresh at plan time so a
/// resize can never leave a stale extent behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// How the bound vertex buffer's flat floats map onto the position
/// attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexBinding {
    pub shader_location: u32,
    pub components_per_vertex: u32,
    pub stride: u64,
    pub offset: u64,
}

/// The one non-indexed draw the pass issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub first_vertex: u32,
    pub vertex_count: u32,
}

/// Everything a frame needs, assembled before any command is recorded.
///
/// The clear color is applied as the pass load op, so it takes effect
/// before the draw by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub viewport: Viewport,
    pub clear_color: wgpu::Color,
    pub binding: VertexBinding,
    pub draw: DrawCall,
}

impl FramePlan {
    pub(crate) fn new(
        surface_size: (u32, u32),
        clear_color: wgpu::Color,
        attribute: &AttributeBinding,
        info: &VertexBufferInfo,
    ) -> Self {
        Self {
            viewport: Viewport {
                width: surface_size.0.max(1),
                height: surface_size.1.max(1),
            },
            clear_color,
            binding: VertexBinding {
                shader_location: attribute.location,
                components_per_vertex: info.components_per_vertex,
                stride: info.stride(),
                offset: 0,
            },
            draw: DrawCall {
                first_vertex: 0,
                vertex_count: info.vertex_count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_binding() -> AttributeBinding {
        AttributeBinding {
            name: "aVertexPosition".to_string(),
            location: 0,
        }
    }

    #[test]
    fn plan_describes_one_triangle_draw() {
        let plan = FramePlan::new(
            (640, 480),
            wgpu::Color::BLACK,
            &position_binding(),
            &VertexBufferInfo::triangle(),
        );

        assert_eq!(
            plan.viewport,
            Viewport {
                width: 640,
                height: 480
            }
        );
        assert_eq!(plan.clear_color, wgpu::Color::BLACK);
        assert_eq!(
            plan.binding,
            VertexBinding {
                shader_location: 0,
                components_per_vertex: 3,
                stride: 12,
                offset: 0,
            }
        );
        assert_eq!(
            plan.draw,
            DrawCall {
                first_vertex: 0,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn viewport_tracks_the_queried_size() {
        let binding = position_binding();
        let info = VertexBufferInfo::triangle();

        let large = FramePlan::new((1920, 1080), wgpu::Color::BLACK, &binding, &info);
        assert_eq!(large.viewport.width, 1920);
        assert_eq!(large.viewport.height, 1080);

        // Degenerate extents clamp to one pixel rather than producing an
        // empty viewport.
        let tiny = FramePlan::new((0, 0), wgpu::Color::BLACK, &binding, &info);
        assert_eq!(tiny.viewport.width, 1);
        assert_eq!(tiny.viewport.height, 1);
    }
}
