//! Collaborator contracts invoked by the frame loop.
//!
//! The frame engine calls these as opaque steps: the view controller first,
//! then the renderer. Neither reports anything back to the engine.

use crate::api::state::SceneState;
use crate::renderer::camera::PerspectiveCamera;

/// Camera/view controller stepped once per frame before rendering.
pub trait ViewController {
    /// Apply accumulated user input (and damping) to the camera.
    fn update(&mut self, camera: &mut PerspectiveCamera);
}

/// Render backend.
///
/// Implementors read the scene and camera and submit a frame. The engine
/// clears point-cloud dirty flags after `render` returns, so a backend must
/// pick up dirty buffers during the call.
///
/// # Example Implementation
///
/// ```ignore
/// struct WebGpuRenderer { /* device, queue, pipelines */ }
///
/// impl Renderer for WebGpuRenderer {
///     fn render(&mut self, state: &SceneState, camera: &PerspectiveCamera) {
///         // Upload dirty clouds, encode passes, submit...
///     }
///
///     fn set_size(&mut self, width: u32, height: u32) {
///         // Reconfigure the surface...
///     }
/// }
/// ```
pub trait Renderer {
    /// Draw the current state from the camera's point of view.
    fn render(&mut self, state: &SceneState, camera: &PerspectiveCamera);

    /// Resize the drawing surface (CSS pixels).
    fn set_size(&mut self, width: u32, height: u32);
}

/// Controller that never moves the camera.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedView;

impl ViewController for FixedView {
    fn update(&mut self, _camera: &mut PerspectiveCamera) {}
}
