use crate::api::config::SceneConfig;
use crate::api::state::SceneState;
use crate::components::label::TextLabel;

/// The contract every scene assembly fulfills.
///
/// Assembly runs once, before the first frame. The frame engine then owns
/// all animation through the category rules, so a setup has no update hook.
pub trait SceneSetup {
    /// Return engine configuration. Called once before assembly.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Create the camera placement, lights and every scene object.
    fn assemble(&mut self, state: &mut SceneState);

    /// Label whose font loads asynchronously after assembly.
    fn label(&self, _state: &SceneState) -> Option<TextLabel> {
        None
    }
}
