//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
///
/// Positions are screen pixels until the pipeline maps them to NDC.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// `0xRRGGBB` to RGBA floats
pub const fn hex_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Same color with a different alpha
pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    use super::hex_rgba;

    pub const BACKGROUND: [f32; 4] = hex_rgba(0x0f172a, 1.0);
    pub const GRID: [f32; 4] = hex_rgba(0x1e293b, 1.0);
    pub const GROUND: [f32; 4] = hex_rgba(0x1e293b, 1.0);
    pub const GROUND_LINE: [f32; 4] = hex_rgba(0x00f0ff, 1.0);
    pub const SPIKE: [f32; 4] = hex_rgba(0xff003c, 1.0);
    pub const SPIKE_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
    pub const BLOCK: [f32; 4] = hex_rgba(0xfacc15, 1.0);
    pub const FINISH: [f32; 4] = hex_rgba(0x10b981, 1.0);
    pub const COIN: [f32; 4] = hex_rgba(0xfbbf24, 1.0);
    pub const ORB: [f32; 4] = hex_rgba(0xf59e0b, 1.0);
    pub const ORB_DASH: [f32; 4] = hex_rgba(0xa855f7, 1.0);
    pub const PORTAL_SHIP: [f32; 4] = hex_rgba(0xec4899, 1.0);
    pub const PORTAL_CUBE: [f32; 4] = hex_rgba(0x22c55e, 1.0);
    pub const PORTAL_WAVE: [f32; 4] = hex_rgba(0x3b82f6, 1.0);
    pub const FLAME: [f32; 4] = hex_rgba(0xfbbf24, 1.0);
    pub const SHIP_HULL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ICON_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgba() {
        assert_eq!(hex_rgba(0xffffff, 1.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(hex_rgba(0x000000, 0.5), [0.0, 0.0, 0.0, 0.5]);
        let red = hex_rgba(0xff003c, 1.0);
        assert_eq!(red[0], 1.0);
        assert!((red[2] - 60.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
