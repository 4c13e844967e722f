use serde::{Deserialize, Serialize};
use crate::api::state::SceneState;
use crate::api::types::{Category, CloudId, ObjectId};
use crate::components::label::Bevel;
use crate::components::mesh::{Material, MeshShape};

/// Static description of the scene for the host.
///
/// The frame buffer only carries per-frame data (matrices, colors, flags).
/// Geometry parameters and materials rarely change, so the host fetches
/// them as JSON whenever the header's scene generation moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    /// Matches `HEADER_SCENE_GENERATION` of the frames it describes.
    pub generation: u32,
    pub objects: Vec<ObjectDescriptor>,
    pub clouds: Vec<CloudDescriptor>,
    /// Present once the label's font has resolved.
    #[serde(default)]
    pub label: Option<LabelDescriptor>,
}

/// Geometry and material of one scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub id: ObjectId,
    #[serde(default)]
    pub tag: String,
    pub category: Category,
    /// Absent for groups; `MeshShape::Light` for light sources.
    #[serde(default)]
    pub shape: Option<MeshShape>,
    pub material: Material,
    /// Texture the host loads for textured materials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_url: Option<String>,
    #[serde(default)]
    pub parent: Option<ObjectId>,
}

/// Point buffer exported through `cloud_ptr`/`cloud_len`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudDescriptor {
    pub id: CloudId,
    /// Object drawing this cloud.
    pub owner: Option<ObjectId>,
    pub points: usize,
}

/// Extrusion parameters for the host-side text geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDescriptor {
    pub text: String,
    pub font_url: String,
    pub size: f32,
    pub height: f32,
    pub curve_segments: u32,
    pub bevel: Bevel,
}

impl SceneManifest {
    /// Describe the current state.
    pub fn describe(state: &SceneState) -> Self {
        let objects = state
            .scene
            .iter()
            .map(|o| ObjectDescriptor {
                id: o.id,
                tag: o.tag.clone(),
                category: o.category,
                shape: o.shape,
                material: o.material,
                texture_url: o.texture_url.clone(),
                parent: o.parent,
            })
            .collect();

        let clouds = state
            .clouds
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let id = CloudId(i as u32);
                CloudDescriptor {
                    id,
                    owner: state.cloud_owner(id),
                    points: c.len(),
                }
            })
            .collect();

        let label = state.label().map(|l| LabelDescriptor {
            text: l.text.clone(),
            font_url: l.font_url.clone(),
            size: l.size,
            height: l.height,
            curve_segments: l.curve_segments,
            bevel: l.bevel,
        });

        Self {
            generation: state.generation(),
            objects,
            clouds,
            label,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
