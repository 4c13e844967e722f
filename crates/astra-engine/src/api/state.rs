use crate::api::config::{SceneConfig, SceneVariant};
use crate::api::types::{CloudId, ObjectId};
use crate::components::label::{LabelPoll, LabelSlot, TextLabel};
use crate::components::light::AmbientLight;
use crate::components::mesh::{Material, MeshShape};
use crate::components::object::SceneObject;
use crate::components::point_cloud::PointCloud;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::animate::SATELLITE_BLINK_FRAMES;
use crate::systems::blink::BlinkTimer;

/// Tag given to the text object once its label resolves.
pub const LABEL_TAG: &str = "label";

/// All mutable scene data, owned by one top-level runner and passed by
/// reference into assembly, the frame engine and the renderer.
pub struct SceneState {
    pub config: SceneConfig,
    pub scene: Scene,
    /// Point buffers referenced by `MeshShape::Points`.
    pub clouds: Vec<PointCloud>,
    pub ambient: AmbientLight,
    pub camera: PerspectiveCamera,
    pub clock: FrameClock,
    pub rng: Rng,
    /// Drives Satellite visibility; satellites start hidden.
    pub satellite_blink: BlinkTimer,
    label_slot: LabelSlot,
    label: Option<TextLabel>,
    /// Bumped whenever objects are added, so the host rebuilds its geometry.
    generation: u32,
    next_id: u32,
}

impl SceneState {
    pub fn new(config: SceneConfig) -> Self {
        let mut camera = PerspectiveCamera::default();
        camera.resize(config.viewport_width, config.viewport_height);
        Self {
            rng: Rng::new(config.seed),
            scene: Scene::with_capacity(config.max_instances),
            clouds: Vec::new(),
            ambient: AmbientLight::default(),
            camera,
            clock: FrameClock::new(),
            satellite_blink: BlinkTimer::new(SATELLITE_BLINK_FRAMES, false),
            label_slot: LabelSlot::empty(),
            label: None,
            generation: 0,
            next_id: 1,
            config,
        }
    }

    pub fn variant(&self) -> SceneVariant {
        self.config.variant
    }

    /// Generate the next unique object ID.
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an object to the scene.
    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        self.generation = self.generation.wrapping_add(1);
        self.scene.spawn(object)
    }

    /// Register a point buffer. Reference it from an object with `MeshShape::Points`.
    pub fn add_cloud(&mut self, cloud: PointCloud) -> CloudId {
        let id = CloudId(self.clouds.len() as u32);
        self.clouds.push(cloud);
        id
    }

    /// Register a point buffer and spawn the object that draws it.
    pub fn spawn_points(&mut self, object: SceneObject, cloud: PointCloud) -> (ObjectId, CloudId) {
        let cloud_id = self.add_cloud(cloud);
        let id = self.spawn(object.with_shape(MeshShape::Points { cloud: cloud_id }));
        (id, cloud_id)
    }

    pub fn cloud(&self, id: CloudId) -> Option<&PointCloud> {
        self.clouds.get(id.0 as usize)
    }

    pub fn cloud_mut(&mut self, id: CloudId) -> Option<&mut PointCloud> {
        self.clouds.get_mut(id.0 as usize)
    }

    /// Object that draws a given cloud.
    pub fn cloud_owner(&self, id: CloudId) -> Option<ObjectId> {
        self.scene
            .iter()
            .find(|o| o.shape == Some(MeshShape::Points { cloud: id }))
            .map(|o| o.id)
    }

    /// Called after a frame is submitted: every buffer has been uploaded.
    pub fn clear_cloud_dirty(&mut self) {
        for cloud in &mut self.clouds {
            cloud.take_dirty();
        }
    }

    /// Install the slot through which an asynchronously loaded label arrives.
    pub fn await_label(&mut self, slot: LabelSlot) {
        self.label_slot = slot;
    }

    /// Spawn the label if its font has resolved. Never blocks.
    /// Returns the new object's ID on the frame the label appears.
    pub fn poll_label(&mut self) -> Option<ObjectId> {
        if !self.label_slot.is_waiting() {
            return None;
        }
        match self.label_slot.poll() {
            LabelPoll::Pending => None,
            LabelPoll::Abandoned => {
                log::debug!("label: font unavailable, label omitted");
                None
            }
            LabelPoll::Ready(label) => {
                let id = self.next_id();
                let object = SceneObject::new(id)
                    .with_tag(LABEL_TAG)
                    .with_pos(label.position)
                    .with_render_order(label.render_order)
                    .with_shape(MeshShape::Text)
                    .with_material(Material {
                        color: label.color,
                        ..Material::default()
                    });
                self.spawn(object);
                log::info!("label: \"{}\" added", label.text);
                self.label = Some(label);
                Some(id)
            }
        }
    }

    /// The resolved label, once it has appeared.
    pub fn label(&self) -> Option<&TextLabel> {
        self.label.as_ref()
    }

    /// Object-set generation counter.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::components::label::label_channel;

    #[test]
    fn new_state_uses_config_aspect() {
        let state = SceneState::new(SceneConfig {
            viewport_width: 1000.0,
            viewport_height: 500.0,
            ..SceneConfig::default()
        });
        assert!((state.camera.aspect - 2.0).abs() < 1e-6);
        assert!(!state.satellite_blink.visible());
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut state = SceneState::new(SceneConfig::default());
        let a = state.next_id();
        let b = state.next_id();
        assert!(b > a);
    }

    #[test]
    fn spawn_points_links_cloud() {
        let mut state = SceneState::new(SceneConfig::default());
        let id = state.next_id();
        let cloud = PointCloud::from_flat(vec![0.0; 9]).unwrap();
        let (oid, cid) = state.spawn_points(SceneObject::new(id), cloud);
        assert_eq!(state.cloud(cid).unwrap().len(), 3);
        assert_eq!(state.cloud_owner(cid), Some(oid));
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn clear_cloud_dirty_resets_all() {
        let mut state = SceneState::new(SceneConfig::default());
        let a = state.add_cloud(PointCloud::from_flat(vec![0.0; 3]).unwrap());
        let b = state.add_cloud(PointCloud::from_flat(vec![1.0; 3]).unwrap());
        state.clear_cloud_dirty();
        assert!(!state.cloud(a).unwrap().is_dirty());
        assert!(!state.cloud(b).unwrap().is_dirty());
    }

    #[test]
    fn label_spawns_once_when_resolved() {
        let mut state = SceneState::new(SceneConfig::default());
        let label = TextLabel::new(">> hi", "font.json")
            .with_position(Vec3::new(-6.0, 8.0, 0.0))
            .with_render_order(3);
        let (promise, slot) = label_channel(label);
        state.await_label(slot);

        assert_eq!(state.poll_label(), None);
        assert!(state.scene.find_by_tag(LABEL_TAG).is_none());

        promise.resolve();
        let id = state.poll_label().unwrap();
        let object = state.scene.get(id).unwrap();
        assert_eq!(object.shape, Some(MeshShape::Text));
        assert_eq!(object.render_order, 3);
        assert_eq!(object.transform.position, Vec3::new(-6.0, 8.0, 0.0));
        assert_eq!(state.label().unwrap().text, ">> hi");

        assert_eq!(state.poll_label(), None);
        assert_eq!(state.scene.len(), 1);
    }

    #[test]
    fn failed_label_leaves_scene_unchanged() {
        let mut state = SceneState::new(SceneConfig::default());
        let (promise, slot) = label_channel(TextLabel::new("x", "font.json"));
        state.await_label(slot);
        promise.reject();
        assert_eq!(state.poll_label(), None);
        assert_eq!(state.poll_label(), None);
        assert!(state.scene.is_empty());
        assert!(state.label().is_none());
    }
}
