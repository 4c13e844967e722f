use serde::{Deserialize, Serialize};

/// Errors from host-supplied configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON payload could not be parsed.
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Viewport dimensions must both be positive.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// A buffer capacity was configured as zero.
    #[error("capacity `{0}` must be non-zero")]
    ZeroCapacity(&'static str),

    /// Overrides must be a JSON object of config fields.
    #[error("scene config overrides must be a JSON object")]
    NotAnObject,
}

/// Which set of object categories the scene assembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneVariant {
    /// Planets, stars, meteors, satellite, dynamic light.
    Baseline,
    /// Baseline plus rockets, comets, asteroids and spaceships.
    #[default]
    Extended,
}

/// Engine configuration, provided by the scene setup and optionally
/// overridden by the host page as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Initial viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Seed for the scene RNG (placement and per-frame jitter).
    pub seed: u64,
    /// Object set to assemble.
    pub variant: SceneVariant,
    /// Maximum number of mesh instances per frame (default: 256).
    pub max_instances: usize,
    /// Maximum number of point lights per frame (default: 8).
    pub max_lights: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            seed: 42,
            variant: SceneVariant::Extended,
            max_instances: 256,
            max_lights: 8,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay the fields present in `json` onto this config and validate.
    /// Fields the JSON leaves out keep their current values.
    pub fn with_overrides(&self, json: &str) -> Result<Self, ConfigError> {
        let serde_json::Value::Object(overrides) = serde_json::from_str::<serde_json::Value>(json)? else {
            return Err(ConfigError::NotAnObject);
        };
        let mut merged = match serde_json::to_value(self)? {
            serde_json::Value::Object(fields) => fields,
            _ => return Err(ConfigError::NotAnObject),
        };
        merged.extend(overrides);
        let config: SceneConfig = serde_json::from_value(serde_json::Value::Object(merged))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if self.max_instances == 0 {
            return Err(ConfigError::ZeroCapacity("max_instances"));
        }
        if self.max_lights == 0 {
            return Err(ConfigError::ZeroCapacity("max_lights"));
        }
        Ok(())
    }

    /// Viewport aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.viewport_width / self.viewport_height
    }
}
