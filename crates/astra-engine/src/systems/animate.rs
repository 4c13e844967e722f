//! Per-frame animation rules.
//!
//! Every animated object carries a `Category`; the `RuleTable` maps each
//! category to one function over the object's `Transform` (and, for point
//! clouds, one function over its position buffer). Rules are plain `fn`
//! pointers so baseline and extended categories coexist in one table:
//! a rule for a category with no objects simply never runs.

use std::collections::HashMap;
use crate::api::state::SceneState;
use crate::api::types::Category;
use crate::components::mesh::MeshShape;
use crate::components::point_cloud::PointCloud;
use crate::components::transform::Transform;
use crate::core::rng::Rng;

/// Planet spin per frame (radians).
pub const PLANET_SPIN: f32 = 0.01;
/// Star field drift per frame on X and Y (radians).
pub const STAR_DRIFT: f32 = 0.001;
/// Meteor travel along -X per frame.
pub const METEOR_STEP: f32 = 0.1;
/// Meteors wrap from below `-METEOR_BOUND` back to `+METEOR_BOUND`.
pub const METEOR_BOUND: f32 = 50.0;
/// Satellite orbit radius and angular rate (radians per ms).
pub const SATELLITE_RADIUS: f64 = 10.0;
pub const SATELLITE_RATE: f64 = 0.001;
pub const SATELLITE_SPIN: f32 = 0.01;
/// Frames the satellite stays in one visibility state, minus one.
pub const SATELLITE_BLINK_FRAMES: u32 = 500;
/// Rocket fall speed range per frame and respawn floor.
pub const ROCKET_FALL: (f32, f32) = (0.1, 0.3);
pub const ROCKET_FLOOR: f32 = -10.0;
pub const ROCKET_SPIN: f32 = 0.1;
/// Comet per-axis travel range per frame and respawn bound.
pub const COMET_STEP: (f32, f32) = (0.1, 0.6);
pub const COMET_BOUND: f32 = 50.0;
pub const ASTEROID_TUMBLE: f32 = 0.01;
/// Spaceship per-axis jitter half-range per frame.
pub const SPACESHIP_JITTER: f32 = 0.1;
pub const SPACESHIP_SPIN: f32 = 0.02;
/// Dynamic light circle radius and angular rate (radians per ms).
pub const LIGHT_RADIUS: f64 = 5.0;
pub const LIGHT_RATE: f64 = 0.002;

/// Inputs shared by all transform rules during one frame.
pub struct RuleContext<'a> {
    pub rng: &'a mut Rng,
    /// Wall-clock milliseconds of the current frame.
    pub elapsed_ms: f64,
}

pub type TransformRule = fn(&mut Transform, &mut RuleContext<'_>);
pub type CloudRule = fn(&mut PointCloud);

/// Category → update rule mapping.
#[derive(Clone, Default)]
pub struct RuleTable {
    transforms: HashMap<Category, TransformRule>,
    clouds: HashMap<Category, CloudRule>,
}

impl RuleTable {
    /// A table with no rules: nothing animates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All baseline and extended rules.
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(Category::Planet, spin_planet)
            .with_rule(Category::StarField, drift_star_field)
            .with_rule(Category::Satellite, orbit_satellite)
            .with_rule(Category::Rocket, drop_rocket)
            .with_rule(Category::Comet, streak_comet)
            .with_rule(Category::Asteroid, tumble_asteroid)
            .with_rule(Category::Spaceship, wander_spaceship)
            .with_rule(Category::DynamicLight, circle_light)
            .with_cloud_rule(Category::MeteorShower, sweep_meteors)
    }

    /// Register (or replace) the transform rule for a category.
    pub fn with_rule(mut self, category: Category, rule: TransformRule) -> Self {
        self.transforms.insert(category, rule);
        self
    }

    /// Register (or replace) the point-cloud rule for a category.
    pub fn with_cloud_rule(mut self, category: Category, rule: CloudRule) -> Self {
        self.clouds.insert(category, rule);
        self
    }

    pub fn transform_rule(&self, category: Category) -> Option<TransformRule> {
        self.transforms.get(&category).copied()
    }

    pub fn cloud_rule(&self, category: Category) -> Option<CloudRule> {
        self.clouds.get(&category).copied()
    }
}

// -- Transform rules --

pub fn spin_planet(t: &mut Transform, _ctx: &mut RuleContext<'_>) {
    t.rotation.y += PLANET_SPIN;
}

pub fn drift_star_field(t: &mut Transform, _ctx: &mut RuleContext<'_>) {
    t.rotation.x += STAR_DRIFT;
    t.rotation.y += STAR_DRIFT;
}

/// Circular orbit in the XZ plane driven by wall-clock time; Y is untouched.
pub fn orbit_satellite(t: &mut Transform, ctx: &mut RuleContext<'_>) {
    let phase = ctx.elapsed_ms * SATELLITE_RATE;
    t.position.x = (SATELLITE_RADIUS * phase.sin()) as f32;
    t.position.z = (SATELLITE_RADIUS * phase.cos()) as f32;
    t.rotation.y += SATELLITE_SPIN;
}

pub fn drop_rocket(t: &mut Transform, ctx: &mut RuleContext<'_>) {
    t.position.y -= ctx.rng.range(ROCKET_FALL.0, ROCKET_FALL.1);
    if t.position.y < ROCKET_FLOOR {
        respawn_rocket(t, ctx.rng);
    }
    t.rotation.y += ROCKET_SPIN;
}

/// Rocket launch volume: x, z in [-5, 5), y in [0, 20).
pub fn respawn_rocket(t: &mut Transform, rng: &mut Rng) {
    t.position.y = rng.centered(20.0) + 10.0;
    t.position.x = rng.centered(10.0);
    t.position.z = rng.centered(10.0);
}

pub fn streak_comet(t: &mut Transform, ctx: &mut RuleContext<'_>) {
    t.position.x -= ctx.rng.range(COMET_STEP.0, COMET_STEP.1);
    t.position.y -= ctx.rng.range(COMET_STEP.0, COMET_STEP.1);
    t.position.z -= ctx.rng.range(COMET_STEP.0, COMET_STEP.1);
    let p = t.position;
    if p.x < -COMET_BOUND || p.y < -COMET_BOUND || p.z < -COMET_BOUND {
        let span = COMET_BOUND * 2.0;
        t.position.x = ctx.rng.centered(span);
        t.position.y = ctx.rng.centered(span);
        t.position.z = ctx.rng.centered(span);
    }
}

pub fn tumble_asteroid(t: &mut Transform, _ctx: &mut RuleContext<'_>) {
    t.rotation.x += ASTEROID_TUMBLE;
    t.rotation.y += ASTEROID_TUMBLE;
    t.rotation.z += ASTEROID_TUMBLE;
}

pub fn wander_spaceship(t: &mut Transform, ctx: &mut RuleContext<'_>) {
    t.position.x += ctx.rng.range(-SPACESHIP_JITTER, SPACESHIP_JITTER);
    t.position.y += ctx.rng.range(-SPACESHIP_JITTER, SPACESHIP_JITTER);
    t.position.z += ctx.rng.range(-SPACESHIP_JITTER, SPACESHIP_JITTER);
    t.rotation.y += SPACESHIP_SPIN;
    t.rotation.z += SPACESHIP_SPIN;
}

pub fn circle_light(t: &mut Transform, ctx: &mut RuleContext<'_>) {
    let phase = ctx.elapsed_ms * LIGHT_RATE;
    t.position.x = (LIGHT_RADIUS * phase.sin()) as f32;
    t.position.z = (LIGHT_RADIUS * phase.cos()) as f32;
}

// -- Point-cloud rules --

/// Move every meteor along -X, wrapping past the far bound.
pub fn sweep_meteors(cloud: &mut PointCloud) {
    for p in cloud.points_mut() {
        p[0] -= METEOR_STEP;
        if p[0] < -METEOR_BOUND {
            p[0] = METEOR_BOUND;
        }
    }
}

/// Apply one frame of animation to every object in the scene.
///
/// Reads the wall-clock time already recorded in `state.clock`. Touches only
/// object transforms, satellite visibility, the blink timer, the RNG and
/// point-cloud buffers (which are marked dirty).
pub fn advance_frame(state: &mut SceneState, rules: &RuleTable) {
    let satellite_visible = state.satellite_blink.tick();
    let elapsed_ms = state.clock.elapsed_ms();

    let SceneState { scene, clouds, rng, .. } = state;
    let mut ctx = RuleContext { rng, elapsed_ms };

    for object in scene.iter_mut() {
        if object.category == Category::Satellite {
            object.visible = satellite_visible;
        }
        if let Some(rule) = rules.transform_rule(object.category) {
            rule(&mut object.transform, &mut ctx);
        }
        if let Some(rule) = rules.cloud_rule(object.category) {
            if let Some(MeshShape::Points { cloud }) = object.shape {
                if let Some(buffer) = clouds.get_mut(cloud.0 as usize) {
                    rule(buffer);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::config::SceneConfig;
    use crate::api::types::ObjectId;
    use crate::components::object::SceneObject;

    fn state() -> SceneState {
        SceneState::new(SceneConfig::default())
    }

    fn spawn(state: &mut SceneState, category: Category, pos: Vec3) -> ObjectId {
        let id = state.next_id();
        state.spawn(SceneObject::new(id).with_category(category).with_pos(pos))
    }

    fn frames(state: &mut SceneState, rules: &RuleTable, n: usize) {
        for i in 0..n {
            state.clock.advance(1_000.0 + i as f64 * 16.0);
            advance_frame(state, rules);
        }
    }

    fn transform(state: &SceneState, id: ObjectId) -> Transform {
        state.scene.get(id).unwrap().transform
    }

    #[test]
    fn planet_spins_linearly() {
        let mut s = state();
        let id = spawn(&mut s, Category::Planet, Vec3::new(5.0, 0.0, 0.0));
        frames(&mut s, &RuleTable::standard(), 100);
        let t = transform(&s, id);
        assert!((t.rotation.y - 1.0).abs() < 1e-4, "rotation.y {}", t.rotation.y);
        assert_eq!(t.rotation.x, 0.0);
        assert_eq!(t.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn static_objects_do_not_move() {
        let mut s = state();
        let id = spawn(&mut s, Category::Static, Vec3::new(0.0, 5.0, 0.0));
        frames(&mut s, &RuleTable::standard(), 50);
        assert_eq!(transform(&s, id), Transform::from_position(Vec3::new(0.0, 5.0, 0.0)));
    }

    #[test]
    fn star_field_drifts_on_two_axes() {
        let mut s = state();
        let id = spawn(&mut s, Category::StarField, Vec3::ZERO);
        frames(&mut s, &RuleTable::standard(), 10);
        let t = transform(&s, id);
        assert!((t.rotation.x - 0.01).abs() < 1e-6);
        assert!((t.rotation.y - 0.01).abs() < 1e-6);
        assert_eq!(t.rotation.z, 0.0);
    }

    #[test]
    fn meteors_step_and_wrap() {
        let mut cloud = PointCloud::from_flat(vec![-49.95, 1.0, 2.0, 0.0, 3.0, 4.0]).unwrap();
        cloud.take_dirty();
        sweep_meteors(&mut cloud);
        assert_eq!(cloud.point(0), Some(Vec3::new(METEOR_BOUND, 1.0, 2.0)));
        let p1 = cloud.point(1).unwrap();
        assert!((p1.x + 0.1).abs() < 1e-6);
        assert_eq!((p1.y, p1.z), (3.0, 4.0));
        assert!(cloud.is_dirty());
    }

    #[test]
    fn meteors_stay_in_bounds_forever() {
        let mut s = state();
        let mut cloud = PointCloud::with_capacity(64);
        for _ in 0..64 {
            let x = s.rng.centered(100.0);
            let y = s.rng.centered(100.0);
            let z = s.rng.centered(100.0);
            cloud.push(Vec3::new(x, y, z));
        }
        let cloud_id = s.add_cloud(cloud);
        let id = s.next_id();
        s.spawn(
            SceneObject::new(id)
                .with_category(Category::MeteorShower)
                .with_shape(MeshShape::Points { cloud: cloud_id }),
        );
        frames(&mut s, &RuleTable::standard(), 3_000);
        let cloud = s.cloud(cloud_id).unwrap();
        assert_eq!(cloud.len(), 64);
        for p in cloud.iter() {
            assert!(p.x >= -METEOR_BOUND && p.x <= METEOR_BOUND, "x out of range: {}", p.x);
        }
        // The object's own transform is untouched.
        assert_eq!(transform(&s, id), Transform::default());
    }

    #[test]
    fn satellite_blinks_after_501_frames() {
        let mut s = state();
        let id = spawn(&mut s, Category::Satellite, Vec3::new(0.0, 10.0, 0.0));
        let rules = RuleTable::standard();

        frames(&mut s, &rules, 500);
        assert!(!s.scene.get(id).unwrap().visible);
        assert_eq!(s.satellite_blink.ticks(), 500);

        frames(&mut s, &rules, 1);
        assert!(s.scene.get(id).unwrap().visible);
        assert_eq!(s.satellite_blink.ticks(), 0);
    }

    #[test]
    fn satellite_orbit_is_circular() {
        let mut s = state();
        let id = spawn(&mut s, Category::Satellite, Vec3::new(0.0, 10.0, 0.0));
        let rules = RuleTable::standard();
        for t in [0.0, 1.0, 785.4, 1_700_000_000_000.0, 1_700_000_123_456.0] {
            s.clock.advance(t);
            advance_frame(&mut s, &rules);
            let p = transform(&s, id).position;
            let expected_x = (SATELLITE_RADIUS * (t * SATELLITE_RATE).sin()) as f32;
            assert!((p.x - expected_x).abs() < 1e-4, "t={} x={} expected {}", t, p.x, expected_x);
            assert!((p.x * p.x + p.z * p.z - 100.0).abs() < 1e-3, "t={} r²={}", t, p.x * p.x + p.z * p.z);
            assert_eq!(p.y, 10.0);
        }
    }

    #[test]
    fn dynamic_light_circles_radius_five() {
        let mut s = state();
        let id = spawn(&mut s, Category::DynamicLight, Vec3::ZERO);
        let rules = RuleTable::standard();
        for t in [0.0, 250.0, 1_234_567.0] {
            s.clock.advance(t);
            advance_frame(&mut s, &rules);
            let p = transform(&s, id).position;
            assert!((p.x * p.x + p.z * p.z - 25.0).abs() < 1e-3);
        }
        s.clock.advance(0.0);
        advance_frame(&mut s, &rules);
        let p = transform(&s, id).position;
        assert!(p.x.abs() < 1e-6 && (p.z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn rocket_falls_then_respawns_in_launch_volume() {
        let mut rng = Rng::new(3);
        let mut ctx = RuleContext { rng: &mut rng, elapsed_ms: 0.0 };
        let mut t = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));

        drop_rocket(&mut t, &mut ctx);
        assert!(t.position.y <= 4.9 && t.position.y > 4.7, "y {}", t.position.y);
        assert!((t.rotation.y - ROCKET_SPIN).abs() < 1e-6);

        let mut t = Transform::from_position(Vec3::new(0.0, -9.95, 0.0));
        drop_rocket(&mut t, &mut ctx);
        assert!(t.position.y >= 0.0 && t.position.y <= 20.0, "y {}", t.position.y);
        assert!(t.position.x >= -5.0 && t.position.x < 5.0);
        assert!(t.position.z >= -5.0 && t.position.z < 5.0);
    }

    #[test]
    fn comet_respawns_all_axes_when_one_leaves() {
        let mut rng = Rng::new(11);
        let mut ctx = RuleContext { rng: &mut rng, elapsed_ms: 0.0 };
        for _ in 0..200 {
            // Only z is about to cross the bound.
            let mut t = Transform::from_position(Vec3::new(40.0, 40.0, -49.95));
            streak_comet(&mut t, &mut ctx);
            let p = t.position;
            for v in [p.x, p.y, p.z] {
                assert!(v >= -COMET_BOUND && v < COMET_BOUND, "axis {} out of range", v);
            }
        }
    }

    #[test]
    fn comet_moves_toward_negative_octant() {
        let mut rng = Rng::new(5);
        let mut ctx = RuleContext { rng: &mut rng, elapsed_ms: 0.0 };
        let mut t = Transform::from_position(Vec3::new(10.0, 10.0, 10.0));
        streak_comet(&mut t, &mut ctx);
        for v in t.position.to_array() {
            assert!(v <= 9.9 && v > 9.4, "step out of range: {}", v);
        }
    }

    #[test]
    fn asteroid_tumbles_on_all_axes() {
        let mut s = state();
        let id = spawn(&mut s, Category::Asteroid, Vec3::ONE);
        frames(&mut s, &RuleTable::standard(), 3);
        let r = transform(&s, id).rotation;
        for v in r.to_array() {
            assert!((v - 0.03).abs() < 1e-6);
        }
    }

    #[test]
    fn spaceship_jitter_is_bounded() {
        let mut rng = Rng::new(8);
        let mut ctx = RuleContext { rng: &mut rng, elapsed_ms: 0.0 };
        let mut t = Transform::new();
        for i in 1..=100 {
            let before = t.position;
            wander_spaceship(&mut t, &mut ctx);
            let d = t.position - before;
            for v in d.to_array() {
                assert!(v.abs() <= SPACESHIP_JITTER + 1e-6);
            }
            assert!((t.rotation.y - SPACESHIP_SPIN * i as f32).abs() < 1e-4);
            assert!((t.rotation.z - SPACESHIP_SPIN * i as f32).abs() < 1e-4);
        }
    }

    #[test]
    fn empty_table_animates_nothing_but_still_blinks() {
        let mut s = state();
        let planet = spawn(&mut s, Category::Planet, Vec3::ZERO);
        let sat = spawn(&mut s, Category::Satellite, Vec3::ZERO);
        frames(&mut s, &RuleTable::empty(), 501);
        assert_eq!(transform(&s, planet), Transform::default());
        assert!(s.scene.get(sat).unwrap().visible);
    }

    #[test]
    fn rule_override_replaces_standard() {
        fn freeze(_t: &mut Transform, _ctx: &mut RuleContext<'_>) {}
        let rules = RuleTable::standard().with_rule(Category::Planet, freeze);
        let mut s = state();
        let id = spawn(&mut s, Category::Planet, Vec3::ZERO);
        frames(&mut s, &rules, 10);
        assert_eq!(transform(&s, id).rotation.y, 0.0);
        assert!(rules.transform_rule(Category::Comet).is_some());
        assert!(rules.cloud_rule(Category::MeteorShower).is_some());
        assert!(rules.transform_rule(Category::Static).is_none());
    }
}
