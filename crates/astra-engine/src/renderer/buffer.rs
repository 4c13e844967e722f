use crate::api::state::SceneState;
use crate::bridge::protocol::*;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{LightInstance, MeshInstance};
use crate::renderer::traits::Renderer;
use crate::systems::render::{build_lights, build_mesh_instances};

/// Renderer that packs each frame into a flat f32 buffer for the host.
///
/// The host reads the buffer through `frame_ptr`/`frame_len` after each tick
/// and uploads it to the GPU. Point clouds are read directly from engine
/// memory; `cloud_dirty` tells the host which ones changed this frame.
pub struct BufferRenderer {
    layout: ProtocolLayout,
    frame: Vec<f32>,
    instances: Vec<MeshInstance>,
    lights: Vec<LightInstance>,
    cloud_dirty: Vec<bool>,
    width: u32,
    height: u32,
    frame_counter: u64,
    instance_count: usize,
    light_count: usize,
    overflow_warned: bool,
}

impl BufferRenderer {
    pub fn new(layout: ProtocolLayout, width: u32, height: u32) -> Self {
        Self {
            frame: vec![0.0; layout.buffer_total_floats],
            instances: Vec::with_capacity(layout.max_instances),
            lights: Vec::with_capacity(layout.max_lights),
            layout,
            cloud_dirty: Vec::new(),
            width,
            height,
            frame_counter: 0,
            instance_count: 0,
            light_count: 0,
            overflow_warned: false,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    /// Packed frame data.
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> usize {
        self.frame.len()
    }

    /// Frames packed so far.
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    pub fn light_count(&self) -> usize {
        self.light_count
    }

    /// Whether a cloud changed in the last packed frame.
    pub fn cloud_dirty(&self, index: usize) -> bool {
        self.cloud_dirty.get(index).copied().unwrap_or(false)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Mesh instances of the last packed frame.
    pub fn instances(&self) -> &[MeshInstance] {
        &self.instances[..self.instance_count]
    }

    fn warn_overflow(&mut self, kind: &str, wanted: usize, max: usize) {
        if !self.overflow_warned {
            log::warn!("renderer: {} {} exceed capacity {}, truncating", wanted, kind, max);
            self.overflow_warned = true;
        }
    }
}

impl Renderer for BufferRenderer {
    fn render(&mut self, state: &SceneState, camera: &PerspectiveCamera) {
        build_mesh_instances(&state.scene, &mut self.instances);
        build_lights(&state.scene, &mut self.lights);

        let max_instances = self.layout.max_instances;
        let max_lights = self.layout.max_lights;
        if self.instances.len() > max_instances {
            self.warn_overflow("instances", self.instances.len(), max_instances);
        }
        if self.lights.len() > max_lights {
            self.warn_overflow("lights", self.lights.len(), max_lights);
        }
        self.instance_count = self.instances.len().min(max_instances);
        self.light_count = self.lights.len().min(max_lights);

        self.cloud_dirty.clear();
        self.cloud_dirty.extend(state.clouds.iter().map(|c| c.is_dirty()));
        let dirty_count = self.cloud_dirty.iter().filter(|d| **d).count();

        self.frame_counter += 1;
        let ambient = state.ambient.rgb();

        let header = &mut self.frame[..HEADER_FLOATS];
        header.fill(0.0);
        header[HEADER_FRAME_COUNTER] = (self.frame_counter % FRAME_COUNTER_WRAP) as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_INSTANCES] = max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = self.instance_count as f32;
        header[HEADER_MAX_LIGHTS] = max_lights as f32;
        header[HEADER_LIGHT_COUNT] = self.light_count as f32;
        header[HEADER_VIEWPORT_WIDTH] = self.width as f32;
        header[HEADER_VIEWPORT_HEIGHT] = self.height as f32;
        header[HEADER_AMBIENT_R] = ambient[0];
        header[HEADER_AMBIENT_G] = ambient[1];
        header[HEADER_AMBIENT_B] = ambient[2];
        header[HEADER_CLOUD_COUNT] = state.clouds.len() as f32;
        header[HEADER_DIRTY_CLOUD_COUNT] = dirty_count as f32;
        header[HEADER_SCENE_GENERATION] = state.generation() as f32;

        let cam = camera.uniform();
        let cam_start = self.layout.camera_offset;
        self.frame[cam_start..cam_start + CAMERA_FLOATS]
            .copy_from_slice(bytemuck::cast_slice(std::slice::from_ref(&cam)));

        let inst_start = self.layout.instance_data_offset;
        let inst_floats = self.instance_count * INSTANCE_FLOATS;
        self.frame[inst_start..inst_start + inst_floats]
            .copy_from_slice(bytemuck::cast_slice(&self.instances[..self.instance_count]));

        let light_start = self.layout.light_data_offset;
        let light_floats = self.light_count * LIGHT_FLOATS;
        self.frame[light_start..light_start + light_floats]
            .copy_from_slice(bytemuck::cast_slice(&self.lights[..self.light_count]));
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SceneConfig;
    use crate::components::light::{AmbientLight, LightComponent};
    use crate::components::mesh::MeshShape;
    use crate::components::object::SceneObject;
    use crate::components::point_cloud::PointCloud;
    use glam::Vec3;

    fn sphere() -> MeshShape {
        MeshShape::Sphere { radius: 1.0, segments: 8 }
    }

    fn state_with(n: usize) -> SceneState {
        let mut state = SceneState::new(SceneConfig::default());
        for i in 0..n {
            let id = state.next_id();
            state.spawn(
                SceneObject::new(id)
                    .with_pos(Vec3::new(i as f32, 0.0, 0.0))
                    .with_shape(sphere()),
            );
        }
        state
    }

    #[test]
    fn header_is_filled() {
        let mut state = state_with(3);
        state.ambient = AmbientLight::new(0xffffff, 0.5);
        let id = state.next_id();
        state.spawn(SceneObject::new(id).with_light(LightComponent::point(0xffffff, 1.0)));

        let mut r = BufferRenderer::new(ProtocolLayout::new(16, 4), 800, 600);
        let camera = state.camera.clone();
        r.render(&state, &camera);

        let f = r.frame();
        assert_eq!(f[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(f[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(f[HEADER_MAX_INSTANCES], 16.0);
        assert_eq!(f[HEADER_INSTANCE_COUNT], 3.0);
        assert_eq!(f[HEADER_LIGHT_COUNT], 1.0);
        assert_eq!(f[HEADER_VIEWPORT_WIDTH], 800.0);
        assert_eq!(f[HEADER_AMBIENT_G], 0.5);
        assert_eq!(f[HEADER_SCENE_GENERATION], 4.0);
        assert_eq!(r.frame_len(), r.layout().buffer_total_floats);
    }

    #[test]
    fn camera_section_matches_uniform() {
        let state = state_with(0);
        let mut r = BufferRenderer::new(ProtocolLayout::new(4, 1), 100, 100);
        let camera = state.camera.clone().with_position(Vec3::new(0.0, 0.0, 20.0));
        r.render(&state, &camera);

        let off = r.layout().camera_offset;
        let view = camera.view_matrix().to_cols_array();
        assert_eq!(&r.frame()[off..off + 16], &view[..]);
        assert_eq!(r.frame()[off + 34], 20.0);
    }

    #[test]
    fn instance_records_are_packed() {
        let state = state_with(2);
        let mut r = BufferRenderer::new(ProtocolLayout::new(4, 1), 100, 100);
        let camera = state.camera.clone();
        r.render(&state, &camera);

        let off = r.layout().instance_data_offset;
        let second = &r.frame()[off + INSTANCE_FLOATS..off + 2 * INSTANCE_FLOATS];
        // translation x of the second sphere
        assert_eq!(second[12], 1.0);
        // visible, id
        assert_eq!(second[22], 1.0);
        assert_eq!(second[23], 2.0);
    }

    #[test]
    fn overflow_is_truncated() {
        let state = state_with(10);
        let mut r = BufferRenderer::new(ProtocolLayout::new(4, 1), 100, 100);
        let camera = state.camera.clone();
        r.render(&state, &camera);
        assert_eq!(r.instance_count(), 4);
        assert_eq!(r.frame()[HEADER_INSTANCE_COUNT], 4.0);
        assert_eq!(r.instances().len(), 4);
    }

    #[test]
    fn dirty_clouds_snapshotted() {
        let mut state = state_with(0);
        state.add_cloud(PointCloud::from_flat(vec![0.0; 3]).unwrap());
        let b = state.add_cloud(PointCloud::from_flat(vec![0.0; 3]).unwrap());
        state.clear_cloud_dirty();
        state.cloud_mut(b).unwrap().mark_dirty();

        let mut r = BufferRenderer::new(ProtocolLayout::new(4, 1), 100, 100);
        let camera = state.camera.clone();
        r.render(&state, &camera);
        assert!(!r.cloud_dirty(0));
        assert!(r.cloud_dirty(1));
        assert!(!r.cloud_dirty(7));
        assert_eq!(r.frame()[HEADER_CLOUD_COUNT], 2.0);
        assert_eq!(r.frame()[HEADER_DIRTY_CLOUD_COUNT], 1.0);
    }

    #[test]
    fn header_frame_counter_wraps_exactly() {
        let state = state_with(0);
        let mut r = BufferRenderer::new(ProtocolLayout::new(4, 1), 100, 100);
        let camera = state.camera.clone();
        r.frame_counter = FRAME_COUNTER_WRAP - 2;

        r.render(&state, &camera);
        assert_eq!(r.frame()[HEADER_FRAME_COUNTER], (FRAME_COUNTER_WRAP - 1) as f32);
        r.render(&state, &camera);
        assert_eq!(r.frame()[HEADER_FRAME_COUNTER], 0.0);
        r.render(&state, &camera);
        assert_eq!(r.frame()[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(r.frame_counter(), FRAME_COUNTER_WRAP + 1);
    }

    #[test]
    fn set_size_updates_header_next_frame() {
        let state = state_with(0);
        let mut r = BufferRenderer::new(ProtocolLayout::new(4, 1), 100, 100);
        r.set_size(640, 480);
        let camera = state.camera.clone();
        r.render(&state, &camera);
        assert_eq!(r.size(), (640, 480));
        assert_eq!(r.frame()[HEADER_VIEWPORT_HEIGHT], 480.0);
    }
}
