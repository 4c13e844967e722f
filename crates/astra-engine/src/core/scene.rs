use glam::Mat4;
use crate::api::types::{Category, ObjectId};
use crate::components::object::SceneObject;

/// Parent chains deeper than this are treated as cycles and cut off.
const MAX_HIERARCHY_DEPTH: usize = 16;

/// Simple object storage using a flat Vec.
/// Designed for small-to-medium object counts (hundreds, not millions).
/// Objects are never removed once spawned.
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(128),
        }
    }

    /// Create a scene with a specific object capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Add an object to the scene.
    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Get a reference to an object by ID.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get a mutable reference to an object by ID.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    /// Find the first object with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.tag == tag)
    }

    /// Find the first object with the given tag (mutable).
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.tag == tag)
    }

    /// All objects of one category.
    pub fn find_all_by_category(&self, category: Category) -> Vec<&SceneObject> {
        self.objects.iter().filter(|o| o.category == category).collect()
    }

    /// World matrix of an object, composing its parent chain.
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let object = self.get(id)?;
        let mut world = object.transform.matrix();
        let mut parent = object.parent;
        let mut depth = 0;
        while let Some(pid) = parent {
            if depth >= MAX_HIERARCHY_DEPTH {
                log::warn!("scene: parent chain of {:?} exceeds {} levels", id, MAX_HIERARCHY_DEPTH);
                break;
            }
            let Some(p) = self.get(pid) else { break };
            world = p.transform.matrix() * world;
            parent = p.parent;
            depth += 1;
        }
        Some(world)
    }

    /// Whether an object and all of its ancestors are visible.
    pub fn is_visible_in_world(&self, id: ObjectId) -> bool {
        let mut current = self.get(id);
        let mut depth = 0;
        while let Some(o) = current {
            if !o.visible {
                return false;
            }
            if depth >= MAX_HIERARCHY_DEPTH {
                break;
            }
            current = o.parent.and_then(|p| self.get(p));
            depth += 1;
        }
        true
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = ObjectId(1);
        scene.spawn(SceneObject::new(id).with_pos(Vec3::new(10.0, 20.0, 30.0)));
        let o = scene.get(id).unwrap();
        assert_eq!(o.transform.position, Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn find_by_tag_and_category() {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::new(ObjectId(1)).with_tag("planet-1").with_category(Category::Planet));
        scene.spawn(SceneObject::new(ObjectId(2)).with_tag("planet-2").with_category(Category::Planet));
        scene.spawn(SceneObject::new(ObjectId(3)).with_tag("nebula"));
        assert_eq!(scene.find_by_tag("nebula").unwrap().id, ObjectId(3));
        assert_eq!(scene.find_all_by_category(Category::Planet).len(), 2);
        assert!(scene.find_by_tag("missing").is_none());
    }

    #[test]
    fn child_world_matrix_composes_parent() {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::new(ObjectId(1)).with_pos(Vec3::new(5.0, 0.0, 0.0)));
        scene.spawn(
            SceneObject::new(ObjectId(2))
                .with_pos(Vec3::new(5.0, 0.0, 0.0))
                .with_parent(ObjectId(1)),
        );
        let world = scene.world_matrix(ObjectId(2)).unwrap();
        let p = world.transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn child_follows_parent_rotation() {
        let mut scene = Scene::new();
        scene.spawn(
            SceneObject::new(ObjectId(1))
                .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0)),
        );
        scene.spawn(
            SceneObject::new(ObjectId(2))
                .with_pos(Vec3::new(1.0, 0.0, 0.0))
                .with_parent(ObjectId(1)),
        );
        let p = scene.world_matrix(ObjectId(2)).unwrap().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn cyclic_parents_terminate() {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::new(ObjectId(1)).with_parent(ObjectId(2)));
        scene.spawn(SceneObject::new(ObjectId(2)).with_parent(ObjectId(1)));
        assert!(scene.world_matrix(ObjectId(1)).is_some());
        assert!(scene.is_visible_in_world(ObjectId(1)));
    }

    #[test]
    fn hidden_parent_hides_child() {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::new(ObjectId(1)).with_visible(false));
        scene.spawn(SceneObject::new(ObjectId(2)).with_parent(ObjectId(1)));
        assert!(!scene.is_visible_in_world(ObjectId(2)));
        assert!(!scene.is_visible_in_world(ObjectId(1)));
    }

    #[test]
    fn missing_object_has_no_matrix() {
        let scene = Scene::new();
        assert!(scene.world_matrix(ObjectId(9)).is_none());
    }
}
