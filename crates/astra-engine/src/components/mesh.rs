use serde::{Deserialize, Serialize};
use crate::api::types::CloudId;

/// Linear RGB color (0..1 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry primitive. The host builds the actual vertex data from these parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshShape {
    Sphere { radius: f32, segments: u32 },
    Cuboid { size: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32, segments: u32 },
    Cone { radius: f32, height: f32, segments: u32 },
    Dodecahedron { radius: f32, detail: u32 },
    Ring { inner: f32, outer: f32, segments: u32 },
    /// Camera-facing textured quad.
    Sprite,
    /// Batched point set backed by a `PointCloud`.
    Points { cloud: CloudId },
    /// Extruded text built from the resolved label.
    Text,
    /// Light source with no geometry.
    Light,
}

impl MeshShape {
    /// Numeric code written into the frame buffer.
    pub fn code(&self) -> f32 {
        match self {
            MeshShape::Sphere { .. } => 0.0,
            MeshShape::Cuboid { .. } => 1.0,
            MeshShape::Cylinder { .. } => 2.0,
            MeshShape::Cone { .. } => 3.0,
            MeshShape::Dodecahedron { .. } => 4.0,
            MeshShape::Ring { .. } => 5.0,
            MeshShape::Sprite => 6.0,
            MeshShape::Points { .. } => 7.0,
            MeshShape::Text => 8.0,
            MeshShape::Light => 9.0,
        }
    }
}

/// How fragments combine with the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Normal,
    Additive,
}

/// Lighting model for a material.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Shading {
    /// Lit with specular highlights.
    #[default]
    Phong,
    /// Unlit flat color.
    Basic,
    /// Unlit point sprites of the given world size.
    Points { size: f32 },
    /// Unlit textured billboard.
    Sprite,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub blend: BlendMode,
    pub shading: Shading,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
            blend: BlendMode::Normal,
            shading: Shading::Phong,
            double_sided: false,
        }
    }
}

impl Material {
    pub fn phong(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            ..Default::default()
        }
    }

    pub fn basic(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            shading: Shading::Basic,
            ..Default::default()
        }
    }

    pub fn points(hex: u32, size: f32) -> Self {
        Self {
            color: Color::from_hex(hex),
            shading: Shading::Points { size },
            ..Default::default()
        }
    }

    pub fn sprite(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            shading: Shading::Sprite,
            ..Default::default()
        }
    }

    /// Mark the material transparent with the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Point size for point materials, 0 otherwise.
    pub fn point_size(&self) -> f32 {
        match self.shading {
            Shading::Points { size } => size,
            _ => 0.0,
        }
    }
}
