//! Orbit view controller: rotate around a target, dolly in/out, pan.
//!
//! Pointer and wheel input accumulates between frames; `step` applies it to
//! the camera once per frame. With damping on, each step applies only a
//! `damping_factor` share of the pending motion and decays the rest, so the
//! camera keeps gliding after the pointer stops.

use glam::{Vec2, Vec3};
use crate::input::queue::{InputEvent, PointerButton};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::ViewController;

/// Keeps the polar angle off the exact poles.
const POLE_EPSILON: f32 = 1e-6;
/// Below this, a residual motion is treated as settled.
const SETTLE_EPSILON: f32 = 1e-6;
/// Dolly factor per wheel notch at zoom_speed 1.0.
const WHEEL_ZOOM_BASE: f32 = 0.95;

/// Spherical coordinates around the orbit target (Y-up).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y.
    phi: f32,
    /// Azimuth around Y, measured from +Z toward +X.
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

/// Orbit camera controller.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enable_damping: bool,
    /// Share of pending motion applied per step (0..1).
    pub damping_factor: f32,
    /// Pan in screen space (true) or in the plane orthogonal to camera up (false).
    pub screen_space_panning: bool,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    /// Viewport size in CSS pixels, used to scale drag distances.
    viewport: Vec2,
    drag: Option<(PointerButton, Vec2)>,

    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    /// Pending pan, in pixels, not yet converted to world units.
    pending_pan: Vec2,
    /// World-space pan still to be applied (decays under damping).
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            screen_space_panning: true,
            min_polar_angle: 0.0,
            max_polar_angle: std::f32::consts::PI,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            viewport: Vec2::new(1.0, 1.0),
            drag: None,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pending_pan: Vec2::ZERO,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut controls = Self::default();
        controls.set_viewport(viewport_width, viewport_height);
        controls
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    /// Accumulate one input event.
    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                self.drag = Some((button, Vec2::new(x, y)));
            }
            InputEvent::PointerUp { .. } => {
                self.drag = None;
            }
            InputEvent::PointerMove { x, y } => {
                let Some((button, last)) = self.drag else { return };
                let pos = Vec2::new(x, y);
                let delta = pos - last;
                self.drag = Some((button, pos));
                match button {
                    PointerButton::Primary => self.rotate_by_pixels(delta),
                    PointerButton::Secondary => self.pending_pan += delta * self.pan_speed,
                    PointerButton::Middle => {
                        if delta.y > 0.0 {
                            self.dolly_out(self.zoom_scale());
                        } else if delta.y < 0.0 {
                            self.dolly_in(self.zoom_scale());
                        }
                    }
                }
            }
            InputEvent::Wheel { delta_y } => {
                if delta_y < 0.0 {
                    self.dolly_in(self.zoom_scale());
                } else if delta_y > 0.0 {
                    self.dolly_out(self.zoom_scale());
                }
            }
        }
    }

    /// Accumulate a batch of events in order.
    pub fn handle_all(&mut self, events: &[InputEvent]) {
        for event in events {
            self.handle(event);
        }
    }

    /// Rotate the orbit by raw angles (radians). Positive `left` turns the view left.
    pub fn rotate(&mut self, left: f32, up: f32) {
        self.delta_theta -= left;
        self.delta_phi -= up;
    }

    fn rotate_by_pixels(&mut self, delta: Vec2) {
        let delta = delta * self.rotate_speed;
        let h = self.viewport.y;
        self.rotate(
            std::f32::consts::TAU * delta.x / h,
            std::f32::consts::TAU * delta.y / h,
        );
    }

    fn zoom_scale(&self) -> f32 {
        WHEEL_ZOOM_BASE.powf(self.zoom_speed)
    }

    /// Move toward the target.
    pub fn dolly_in(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Move away from the target.
    pub fn dolly_out(&mut self, factor: f32) {
        self.scale /= factor;
    }

    /// Whether any motion is still pending.
    pub fn is_settled(&self) -> bool {
        self.delta_theta.abs() < SETTLE_EPSILON
            && self.delta_phi.abs() < SETTLE_EPSILON
            && self.pan_offset.length() < SETTLE_EPSILON
            && self.pending_pan == Vec2::ZERO
            && self.scale == 1.0
    }

    /// Convert pixel pan into a world-space offset for the current camera.
    fn resolve_pan(&mut self, camera: &PerspectiveCamera) {
        if self.pending_pan == Vec2::ZERO {
            return;
        }
        let offset = camera.position - camera.target;
        let target_distance = offset.length() * (camera.fov_y_deg.to_radians() / 2.0).tan();
        let h = self.viewport.y;
        let left = 2.0 * self.pending_pan.x * target_distance / h;
        let up = 2.0 * self.pending_pan.y * target_distance / h;

        let forward = (camera.target - camera.position).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        // Dragging right moves the scene right, i.e. the target left.
        self.pan_offset += right * -left;

        let up_axis = if self.screen_space_panning {
            right.cross(forward).normalize_or_zero()
        } else {
            camera.up.cross(right).normalize_or_zero()
        };
        self.pan_offset += up_axis * up;
        self.pending_pan = Vec2::ZERO;
    }

    /// Apply accumulated motion to the camera. Returns true if the camera moved.
    pub fn step(&mut self, camera: &mut PerspectiveCamera) -> bool {
        self.resolve_pan(camera);

        let before = camera.position;
        let mut spherical = Spherical::from_offset(camera.position - camera.target);

        if self.enable_damping {
            spherical.theta += self.delta_theta * self.damping_factor;
            spherical.phi += self.delta_phi * self.damping_factor;
        } else {
            spherical.theta += self.delta_theta;
            spherical.phi += self.delta_phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);

        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            camera.target += self.pan_offset * self.damping_factor;
        } else {
            camera.target += self.pan_offset;
        }

        camera.position = camera.target + spherical.to_offset();

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(before) > SETTLE_EPSILON * SETTLE_EPSILON
    }
}

impl ViewController for OrbitControls {
    fn update(&mut self, camera: &mut PerspectiveCamera) {
        self.step(camera);
    }
}
