use bytemuck::{Pod, Zeroable};

/// Per-object render data written into the frame buffer.
/// Must match the TypeScript protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix (parent chain applied).
    pub model: [f32; 16],
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Material opacity.
    pub opacity: f32,
    /// `MeshShape::code`.
    pub shape: f32,
    pub render_order: f32,
    /// 1.0 if the object and all its ancestors are visible.
    pub visible: f32,
    pub object_id: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Point light in world space.
/// Wire format: `[x, y, z, r, g, b, intensity, distance]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    pub distance: f32,
}

impl LightInstance {
    pub const FLOATS: usize = 8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::{INSTANCE_FLOATS, LIGHT_FLOATS};

    #[test]
    fn mesh_instance_matches_protocol() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::STRIDE_BYTES);
        assert_eq!(MeshInstance::FLOATS, INSTANCE_FLOATS);
    }

    #[test]
    fn light_instance_matches_protocol() {
        assert_eq!(std::mem::size_of::<LightInstance>(), 32);
        assert_eq!(LightInstance::FLOATS, LIGHT_FLOATS);
    }
}
