//! Instance records for drawing unit boxes on the GPU

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Shading model the host should use for a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Ambient + diffuse lighting
    Lit,
    /// Flat color, ignores lights
    Unlit,
}

impl Material {
    #[inline]
    pub fn id(self) -> u32 {
        match self {
            Material::Lit => 0,
            Material::Unlit => 1,
        }
    }
}

/// One unit cube (`[-1, 1]³`) placed by `model`
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BoxInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub material: u32,
    _pad: [u32; 3],
}

impl BoxInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Uint32
    ];

    pub fn new(model: Mat4, color: [f32; 4], material: Material) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            material: material.id(),
            _pad: [0; 3],
        }
    }

    /// Per-instance layout; locations 0 and 1 are left for mesh position/normal
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BoxInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::hex_color;

    pub const BODY: [f32; 4] = hex_color(0xF9DC35);
    pub const PIPE: [f32; 4] = hex_color(0x528A2C);
    pub const PIPE_RIM: [f32; 4] = hex_color(0x142409);
    pub const BACKGROUND: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const END_BACKDROP: [f32; 4] = [0.05, 0.05, 0.08, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<BoxInstance>(), 96);
        let layout = BoxInstance::desc();
        assert_eq!(layout.array_stride, 96);
        assert_eq!(layout.attributes.len(), 6);
        assert_eq!(layout.attributes[4].offset, 64);
        assert_eq!(layout.attributes[5].offset, 80);
    }

    #[test]
    fn test_instance_bytes() {
        let instances = [
            BoxInstance::new(Mat4::IDENTITY, colors::PIPE, Material::Lit),
            BoxInstance::new(Mat4::IDENTITY, colors::PIPE_RIM, Material::Unlit),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 192);
        assert_eq!(instances[1].material, 1);
    }
}
