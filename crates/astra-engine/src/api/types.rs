use serde::{Deserialize, Serialize};

/// Unique identifier for an object in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Index of a point cloud owned by `SceneState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CloudId(pub u32);

/// Animation category of a scene object.
/// The frame engine looks up one update rule per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Planet,
    StarField,
    MeteorShower,
    Satellite,
    Rocket,
    Comet,
    Asteroid,
    Spaceship,
    DynamicLight,
    /// Decorative object with no per-frame rule.
    Static,
}

impl Category {
    /// Every category.
    pub const ALL: [Category; 10] = [
        Category::Planet,
        Category::StarField,
        Category::MeteorShower,
        Category::Satellite,
        Category::Rocket,
        Category::Comet,
        Category::Asteroid,
        Category::Spaceship,
        Category::DynamicLight,
        Category::Static,
    ];

    /// Categories that only exist in the extended scene variant.
    pub fn is_extended(self) -> bool {
        matches!(
            self,
            Category::Rocket | Category::Comet | Category::Asteroid | Category::Spaceship
        )
    }
}
