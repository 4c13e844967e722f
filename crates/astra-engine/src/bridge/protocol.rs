/// Frame buffer layout shared with the host renderer.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 36 floats: view 16, projection 16, eye position 4]
/// [Instances: max_instances × 24 floats]
/// [Lights: max_lights × 8 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::SceneConfig;
use crate::renderer::camera::CameraUniform;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_LIGHTS: usize = 4;
pub const HEADER_LIGHT_COUNT: usize = 5;
pub const HEADER_VIEWPORT_WIDTH: usize = 6;
pub const HEADER_VIEWPORT_HEIGHT: usize = 7;
pub const HEADER_AMBIENT_R: usize = 8;
pub const HEADER_AMBIENT_G: usize = 9;
pub const HEADER_AMBIENT_B: usize = 10;
pub const HEADER_CLOUD_COUNT: usize = 11;
pub const HEADER_DIRTY_CLOUD_COUNT: usize = 12;
/// Changes whenever objects are added; the host re-reads the scene manifest.
pub const HEADER_SCENE_GENERATION: usize = 13;

/// The header frame counter wraps here; larger integers are not exact in f32.
pub const FRAME_COUNTER_WRAP: u64 = 1 << 24;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section (wire format, never changes).
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per mesh instance: model 16, rgba 4, shape, order, visible, id.
pub const INSTANCE_FLOATS: usize = 24;

/// Floats per light: x, y, z, r, g, b, intensity, distance.
pub const LIGHT_FLOATS: usize = 8;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum mesh instances.
    pub max_instances: usize,
    /// Maximum point lights.
    pub max_lights: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of light data section in floats.
    pub light_data_floats: usize,

    /// Offset (in floats) where camera data begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_lights: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let light_data_offset = instance_data_offset + instance_data_floats;

        let buffer_total_floats = light_data_offset + light_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_lights,
            instance_data_floats,
            light_data_floats,
            camera_offset,
            instance_data_offset,
            light_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a SceneConfig.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.max_instances, config.max_lights)
    }
}
