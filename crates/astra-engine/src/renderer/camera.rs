use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective camera for 3D rendering.
/// Right-handed, looks from `position` toward `target`, depth in [0, 1] (WebGPU).
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// World-space eye position (w = 1).
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }

    /// Resize the camera viewport (e.g. on window resize).
    /// Returns false and leaves the camera untouched for degenerate sizes.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) -> bool {
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return false;
        }
        self.aspect = viewport_width / viewport_height;
        true
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0)
    }
}
