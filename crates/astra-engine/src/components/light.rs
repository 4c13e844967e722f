use crate::components::mesh::Color;

/// Point light attached to a scene object; positioned by the object's transform.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, distance]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightComponent {
    pub color: Color,
    pub intensity: f32,
    /// Falloff distance in world units (0 = infinite).
    pub distance: f32,
}

impl LightComponent {
    pub fn point(hex: u32, intensity: f32) -> Self {
        Self {
            color: Color::from_hex(hex),
            intensity,
            distance: 0.0,
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }
}

/// Scene-wide ambient light.
///
/// Defaults to black (no ambient contribution) until the scene sets one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 0.0,
        }
    }
}

impl AmbientLight {
    pub fn new(hex: u32, intensity: f32) -> Self {
        Self {
            color: Color::from_hex(hex),
            intensity,
        }
    }

    /// Premultiplied RGB contribution.
    pub fn rgb(&self) -> [f32; 3] {
        [
            self.color.r * self.intensity,
            self.color.g * self.intensity,
            self.color.b * self.intensity,
        ]
    }
}
