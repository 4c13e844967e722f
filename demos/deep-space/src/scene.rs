//! Deep Space: a decorative space scene.
//!
//! Everything here is placed once; the engine's category rules animate it.
//! The baseline variant has planets, stars, meteors, the satellite and the
//! lights. The extended variant adds rockets, comets, asteroids and spaceships.

use std::f32::consts::FRAC_PI_2;

use astra_engine::*;
use glam::Vec3;

// ── Camera & lighting ────────────────────────────────────────────────

const CAMERA_POS: Vec3 = Vec3::new(0.0, 0.0, 20.0);
const AMBIENT: (u32, f32) = (0xffffff, 0.5);
const NEBULA_TEXTURE: &str = "https://threejs.org/examples/textures/lensflare/lensflare0.png";
const KEY_LIGHT_POS: Vec3 = Vec3::new(10.0, 10.0, 10.0);
const DYNAMIC_LIGHT_DISTANCE: f32 = 50.0;

// ── Point fields: (count, cube side, color, point size) ──────────────

const STARS: (usize, f32, u32, f32) = (10_000, 2000.0, 0xffffff, 0.5);
const HALO: (usize, f32, u32, f32) = (500, 2.0, 0x00ffff, 0.1);
const METEORS: (usize, f32, u32, f32) = (200, 100.0, 0xff0000, 0.1);
const GALAXY: (usize, f32, u32, f32) = (5000, 500.0, 0xff00ff, 0.5);

// ── Bodies ───────────────────────────────────────────────────────────

const PLANET_COLOR: u32 = 0x3333ff;
const PLANET_POSITIONS: [Vec3; 4] = [
    Vec3::new(5.0, 0.0, 0.0),
    Vec3::new(-5.0, 0.0, 0.0),
    Vec3::new(0.0, 5.0, 0.0),
    Vec3::new(0.0, -5.0, 0.0),
];
/// Only the first two planets spin.
const SPINNING_PLANETS: usize = 2;

const ROCKET_COUNT: usize = 3;
const COMET_COUNT: usize = 5;
const ASTEROID_COUNT: usize = 50;
const SPACESHIP_COUNT: usize = 3;

// ── Render order ─────────────────────────────────────────────────────

const ORDER_STARS: u32 = 0;
const ORDER_NEBULA: u32 = 1;
const ORDER_HALO: u32 = 2;
const ORDER_LABEL: u32 = 3;
const ORDER_METEORS: u32 = 4;
const ORDER_SATELLITE: u32 = 5;
const ORDER_ROCKETS: u32 = 6;
const ORDER_COMETS: u32 = 7;
const ORDER_ASTEROIDS: u32 = 8;
const ORDER_SPACESHIPS: u32 = 9;
const ORDER_GALAXY: u32 = 10;

// ── Label ────────────────────────────────────────────────────────────

const LABEL_FONT: &str = "https://threejs.org/examples/fonts/helvetiker_regular.typeface.json";
const LABEL_TEXT: &str = "Nesar A. Naeem";
const LABEL_PROMPT: &str = ">> ";
const LABEL_POS: Vec3 = Vec3::new(-6.0, 8.0, 0.0);
const LABEL_COLOR: u32 = 0xffd700;

pub struct DeepSpace;

impl DeepSpace {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DeepSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSetup for DeepSpace {
    fn assemble(&mut self, state: &mut SceneState) {
        state.camera.position = CAMERA_POS;
        state.ambient = AmbientLight::new(AMBIENT.0, AMBIENT.1);

        spawn_lights(state);
        spawn_backdrop(state);
        let planets = spawn_planets(state);
        spawn_meteors(state);
        spawn_satellite(state);

        if state.variant() == SceneVariant::Extended {
            spawn_rockets(state);
            spawn_comets(state);
            spawn_asteroids(state);
            spawn_spaceships(state);
        }

        spawn_rings(state, &planets[..SPINNING_PLANETS]);
        spawn_points(state, "galaxy", Category::Static, GALAXY, ORDER_GALAXY, None);
    }

    fn label(&self, state: &SceneState) -> Option<TextLabel> {
        let text = match state.variant() {
            SceneVariant::Extended => format!("{}{}", LABEL_PROMPT, LABEL_TEXT),
            SceneVariant::Baseline => LABEL_TEXT.to_string(),
        };
        Some(
            TextLabel::new(text, LABEL_FONT)
                .with_position(LABEL_POS)
                .with_color(LABEL_COLOR)
                .with_render_order(ORDER_LABEL),
        )
    }
}

/// `count` points uniform in a cube of side `span` centered on the origin.
fn scatter(rng: &mut Rng, count: usize, span: f32) -> PointCloud {
    let mut cloud = PointCloud::with_capacity(count);
    for _ in 0..count {
        cloud.push(random_in_cube(rng, span));
    }
    cloud
}

fn random_in_cube(rng: &mut Rng, span: f32) -> Vec3 {
    let x = rng.centered(span);
    let y = rng.centered(span);
    let z = rng.centered(span);
    Vec3::new(x, y, z)
}

fn spawn_points(
    state: &mut SceneState,
    tag: &str,
    category: Category,
    (count, span, color, size): (usize, f32, u32, f32),
    order: u32,
    parent: Option<ObjectId>,
) -> ObjectId {
    let cloud = scatter(&mut state.rng, count, span);
    let id = state.next_id();
    let mut object = SceneObject::new(id)
        .with_tag(tag)
        .with_category(category)
        .with_render_order(order)
        .with_material(Material::points(color, size));
    if let Some(parent) = parent {
        object = object.with_parent(parent);
    }
    state.spawn_points(object, cloud).0
}

fn spawn_lights(state: &mut SceneState) {
    let id = state.next_id();
    state.spawn(
        SceneObject::new(id)
            .with_tag("key_light")
            .with_pos(KEY_LIGHT_POS)
            .with_light(LightComponent::point(0xffffff, 1.0)),
    );

    let id = state.next_id();
    state.spawn(
        SceneObject::new(id)
            .with_tag("dynamic_light")
            .with_category(Category::DynamicLight)
            .with_light(LightComponent::point(0xff0000, 2.0).with_distance(DYNAMIC_LIGHT_DISTANCE)),
    );
}

fn spawn_backdrop(state: &mut SceneState) {
    let stars = spawn_points(state, "stars", Category::StarField, STARS, ORDER_STARS, None);
    if let Some(object) = state.scene.get_mut(stars) {
        object.material = object.material.with_opacity(0.5);
    }

    let nebulae = [
        (0x4444ff, 50.0, Vec3::new(0.0, 0.0, -10.0)),
        (0xff44ff, 30.0, Vec3::new(30.0, 0.0, -20.0)),
    ];
    for (color, size, pos) in nebulae {
        let id = state.next_id();
        state.spawn(
            SceneObject::new(id)
                .with_tag("nebula")
                .with_pos(pos)
                .with_scale(Vec3::new(size, size, 1.0))
                .with_render_order(ORDER_NEBULA)
                .with_shape(MeshShape::Sprite)
                .with_material(Material::sprite(color).with_blend(BlendMode::Additive))
                .with_texture(NEBULA_TEXTURE),
        );
    }
}

fn spawn_planets(state: &mut SceneState) -> Vec<ObjectId> {
    let mut planets = Vec::with_capacity(PLANET_POSITIONS.len());
    for (i, pos) in PLANET_POSITIONS.into_iter().enumerate() {
        let category = if i < SPINNING_PLANETS {
            Category::Planet
        } else {
            Category::Static
        };
        let id = state.next_id();
        state.spawn(
            SceneObject::new(id)
                .with_tag("planet")
                .with_category(category)
                .with_pos(pos)
                .with_shape(MeshShape::Sphere { radius: 1.0, segments: 32 })
                .with_material(Material::phong(PLANET_COLOR)),
        );
        planets.push(id);
    }

    // Halo rides on the first planet.
    let halo = spawn_points(state, "halo", Category::Static, HALO, ORDER_HALO, Some(planets[0]));
    if let Some(object) = state.scene.get_mut(halo) {
        object.material = object.material.with_opacity(0.7);
    }
    planets
}

fn spawn_meteors(state: &mut SceneState) {
    spawn_points(state, "meteors", Category::MeteorShower, METEORS, ORDER_METEORS, None);
}

fn spawn_satellite(state: &mut SceneState) {
    let id = state.next_id();
    state.spawn(
        SceneObject::new(id)
            .with_tag("satellite")
            .with_category(Category::Satellite)
            .with_pos(Vec3::new(0.0, 10.0, 0.0))
            .with_visible(false)
            .with_render_order(ORDER_SATELLITE)
            .with_shape(MeshShape::Cuboid { size: 0.5 })
            .with_material(Material::phong(0x00ff00)),
    );
}

fn spawn_rockets(state: &mut SceneState) {
    for _ in 0..ROCKET_COUNT {
        let mut transform = Transform::default();
        systems::animate::respawn_rocket(&mut transform, &mut state.rng);
        let id = state.next_id();
        state.spawn(
            SceneObject::new(id)
                .with_tag("rocket")
                .with_category(Category::Rocket)
                .with_pos(transform.position)
                .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                .with_render_order(ORDER_ROCKETS)
                .with_shape(MeshShape::Cylinder {
                    radius_top: 0.1,
                    radius_bottom: 0.3,
                    height: 1.0,
                    segments: 32,
                })
                .with_material(Material::phong(0xff0000)),
        );
    }
}

fn spawn_comets(state: &mut SceneState) {
    for _ in 0..COMET_COUNT {
        let pos = random_in_cube(&mut state.rng, 100.0);
        let id = state.next_id();
        state.spawn(
            SceneObject::new(id)
                .with_tag("comet")
                .with_category(Category::Comet)
                .with_pos(pos)
                .with_render_order(ORDER_COMETS)
                .with_shape(MeshShape::Sphere { radius: 0.5, segments: 16 })
                .with_material(Material::phong(0xffff00)),
        );
    }
}

fn spawn_asteroids(state: &mut SceneState) {
    for _ in 0..ASTEROID_COUNT {
        let pos = random_in_cube(&mut state.rng, 100.0);
        let id = state.next_id();
        state.spawn(
            SceneObject::new(id)
                .with_tag("asteroid")
                .with_category(Category::Asteroid)
                .with_pos(pos)
                .with_render_order(ORDER_ASTEROIDS)
                .with_shape(MeshShape::Dodecahedron { radius: 0.2, detail: 1 })
                .with_material(Material::phong(0xaaaaaa)),
        );
    }
}

fn spawn_spaceships(state: &mut SceneState) {
    for _ in 0..SPACESHIP_COUNT {
        let pos = random_in_cube(&mut state.rng, 50.0);
        let id = state.next_id();
        state.spawn(
            SceneObject::new(id)
                .with_tag("spaceship")
                .with_category(Category::Spaceship)
                .with_pos(pos)
                .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                .with_render_order(ORDER_SPACESHIPS)
                .with_shape(MeshShape::Cone { radius: 0.2, height: 1.0, segments: 32 })
                .with_material(Material::phong(0x00ff00)),
        );
    }
}

/// One ring per planet, offset along the planet's own x by its position.
fn spawn_rings(state: &mut SceneState, planets: &[ObjectId]) {
    for (&planet, pos) in planets.iter().zip(PLANET_POSITIONS) {
        let id = state.next_id();
        state.spawn(
            SceneObject::new(id)
                .with_tag("ring")
                .with_parent(planet)
                .with_pos(pos)
                .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                .with_shape(MeshShape::Ring { inner: 1.2, outer: 1.5, segments: 32 })
                .with_material(Material::basic(0xffff00).double_sided()),
        );
    }
}
