use glam::Vec3;
use crate::components::mesh::MeshShape;
use crate::core::scene::Scene;
use crate::renderer::instance::{LightInstance, MeshInstance};

/// Collect one instance per drawable object, sorted by render order.
/// Ties keep insertion order. Objects without geometry are skipped.
/// Hidden objects are still emitted with `visible = 0` so the host can keep
/// their GPU resources around.
pub fn build_mesh_instances(scene: &Scene, out: &mut Vec<MeshInstance>) {
    out.clear();

    let mut ordered: Vec<(u32, MeshInstance)> = Vec::with_capacity(scene.len());

    for object in scene.iter() {
        let shape = match object.shape {
            Some(MeshShape::Light) | None => continue,
            Some(shape) => shape,
        };

        let model = match scene.world_matrix(object.id) {
            Some(m) => m,
            None => continue,
        };

        let color = object.material.color;
        let instance = MeshInstance {
            model: model.to_cols_array(),
            r: color.r,
            g: color.g,
            b: color.b,
            opacity: object.material.opacity,
            shape: shape.code(),
            render_order: object.render_order as f32,
            visible: if scene.is_visible_in_world(object.id) { 1.0 } else { 0.0 },
            object_id: object.id.0 as f32,
        };
        ordered.push((object.render_order, instance));
    }

    // sort_by_key is stable
    ordered.sort_by_key(|(order, _)| *order);
    out.extend(ordered.into_iter().map(|(_, inst)| inst));
}

/// Collect point lights at their world positions.
/// A hidden light contributes zero intensity.
pub fn build_lights(scene: &Scene, out: &mut Vec<LightInstance>) {
    out.clear();

    for object in scene.iter() {
        let light = match &object.light {
            Some(l) => l,
            None => continue,
        };

        let pos = match scene.world_matrix(object.id) {
            Some(m) => m.transform_point3(Vec3::ZERO),
            None => continue,
        };

        let intensity = if scene.is_visible_in_world(object.id) {
            light.intensity
        } else {
            0.0
        };

        out.push(LightInstance {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: light.color.r,
            g: light.color.g,
            b: light.color.b,
            intensity,
            distance: light.distance,
        });
    }
}
