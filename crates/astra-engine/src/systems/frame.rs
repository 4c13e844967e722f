use crate::api::state::SceneState;
use crate::renderer::traits::{Renderer, ViewController};
use crate::systems::animate::{advance_frame, RuleTable};

/// Run one display frame.
///
/// Order is fixed: clock, label adoption, object updates, view controller,
/// render. Point-cloud dirty flags are cleared once the renderer returns.
pub fn run_frame(
    state: &mut SceneState,
    rules: &RuleTable,
    now_ms: f64,
    view: &mut impl ViewController,
    renderer: &mut impl Renderer,
) {
    state.clock.advance(now_ms);
    state.poll_label();
    advance_frame(state, rules);
    view.update(&mut state.camera);
    renderer.render(state, &state.camera);
    state.clear_cloud_dirty();
}

/// Apply a viewport resize to the camera and renderer.
/// Degenerate sizes (either side zero) are ignored.
pub fn resize(state: &mut SceneState, renderer: &mut impl Renderer, width: u32, height: u32) {
    if !state.camera.resize(width as f32, height as f32) {
        log::debug!("resize: ignoring {}x{}", width, height);
        return;
    }
    renderer.set_size(width, height);
    log::debug!("resize: {}x{} (aspect {:.3})", width, height, state.camera.aspect);
}
