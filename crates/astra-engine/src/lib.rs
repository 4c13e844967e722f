pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, SceneConfig, SceneVariant};
pub use api::setup::SceneSetup;
pub use api::state::SceneState;
pub use api::types::{Category, CloudId, ObjectId};
pub use components::label::{label_channel, LabelPoll, LabelPromise, LabelSlot, TextLabel};
pub use components::light::{AmbientLight, LightComponent};
pub use components::mesh::{BlendMode, Color, Material, MeshShape, Shading};
pub use components::object::SceneObject;
pub use components::point_cloud::PointCloud;
pub use components::transform::Transform;
pub use crate::core::rng::Rng;
pub use crate::core::scene::Scene;
pub use crate::core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use renderer::buffer::BufferRenderer;
pub use renderer::camera::{CameraUniform, PerspectiveCamera};
pub use renderer::controls::OrbitControls;
pub use renderer::instance::{LightInstance, MeshInstance};
pub use renderer::traits::{FixedView, Renderer, ViewController};
pub use bridge::manifest::SceneManifest;
pub use bridge::protocol::ProtocolLayout;
pub use systems::animate::{advance_frame, RuleContext, RuleTable};
pub use systems::blink::BlinkTimer;
pub use systems::frame::{resize, run_frame};
