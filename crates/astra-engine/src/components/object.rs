use glam::Vec3;
use crate::api::types::{Category, ObjectId};
use crate::components::light::LightComponent;
use crate::components::mesh::{Material, MeshShape};
use crate::components::transform::Transform;

/// Fat scene object: a single struct with optional components.
/// Every object persists for the lifetime of the scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Unique identifier.
    pub id: ObjectId,
    /// String tag for finding objects by name.
    pub tag: String,
    /// Selects the per-frame update rule.
    pub category: Category,
    pub transform: Transform,
    /// Whether the renderer draws this object (children inherit hiding).
    pub visible: bool,
    /// Lower values draw first.
    pub render_order: u32,
    /// Parent object; the transform is then relative to the parent.
    pub parent: Option<ObjectId>,
    /// Geometry (optional; objects without a shape are invisible groups).
    pub shape: Option<MeshShape>,
    pub material: Material,
    /// Image the host samples for the material color (sprites).
    pub texture_url: Option<String>,
    /// Light source (optional).
    pub light: Option<LightComponent>,
}

impl SceneObject {
    /// Create a new static object with the given ID at the origin.
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            tag: String::new(),
            category: Category::Static,
            transform: Transform::default(),
            visible: true,
            render_order: 0,
            parent: None,
            shape: None,
            material: Material::default(),
            texture_url: None,
            light: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.transform.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_render_order(mut self, order: u32) -> Self {
        self.render_order = order;
        self
    }

    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_shape(mut self, shape: MeshShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_texture(mut self, url: impl Into<String>) -> Self {
        self.texture_url = Some(url.into());
        self
    }

    pub fn with_light(mut self, light: LightComponent) -> Self {
        self.light = Some(light);
        self.shape = Some(MeshShape::Light);
        self
    }
}
