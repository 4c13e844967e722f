use astra_engine::{
    label_channel, CloudId, InputEvent, InputQueue, LabelPromise, OrbitControls,
    ProtocolLayout, RuleTable, SceneConfig, SceneManifest, SceneSetup, SceneState,
    BufferRenderer,
};
use astra_engine::systems::frame;

/// Share of pending orbit motion applied per frame.
const ORBIT_DAMPING: f32 = 0.25;

/// Generic scene runner that wires up the engine loop.
///
/// Each concrete scene (e.g., `deep-space`) creates a `thread_local!`
/// SceneRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct SceneRunner<S: SceneSetup> {
    setup: S,
    state: SceneState,
    rules: RuleTable,
    controls: OrbitControls,
    input: InputQueue,
    renderer: BufferRenderer,
    /// Host-side half of the label load, until the host reports back.
    label: Option<LabelPromise>,
    manifest_json: String,
    manifest_generation: Option<u32>,
    initialized: bool,
}

impl<S: SceneSetup> SceneRunner<S> {
    pub fn new(setup: S) -> Self {
        let config = setup.config();
        let layout = ProtocolLayout::from_config(&config);
        let renderer = BufferRenderer::new(
            layout,
            config.viewport_width as u32,
            config.viewport_height as u32,
        );
        let controls = scene_controls(&config);

        Self {
            setup,
            state: SceneState::new(config),
            rules: RuleTable::standard(),
            controls,
            input: InputQueue::new(),
            renderer,
            label: None,
            manifest_json: String::new(),
            manifest_generation: None,
            initialized: false,
        }
    }

    /// Assemble the scene with the setup's own config. Call once after construction.
    pub fn init(&mut self) {
        let config = self.setup.config();
        self.init_with(config);
    }

    /// Assemble the scene with host-supplied JSON overrides on top of the
    /// setup's config. Invalid JSON is logged and the setup's config is used.
    pub fn init_with_config(&mut self, json: &str) {
        let base = self.setup.config();
        let config = match base.with_overrides(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: {}, using defaults", e);
                base
            }
        };
        self.init_with(config);
    }

    fn init_with(&mut self, config: SceneConfig) {
        let layout = ProtocolLayout::from_config(&config);
        self.renderer = BufferRenderer::new(
            layout,
            config.viewport_width as u32,
            config.viewport_height as u32,
        );
        self.controls = scene_controls(&config);
        self.state = SceneState::new(config);

        self.setup.assemble(&mut self.state);

        if let Some(label) = self.setup.label(&self.state) {
            let (promise, slot) = label_channel(label);
            self.state.await_label(slot);
            self.label = Some(promise);
        }

        self.initialized = true;
        log::info!(
            "scene: {} objects, {} point clouds ({:?})",
            self.state.scene.len(),
            self.state.clouds.len(),
            self.state.variant(),
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one display frame at wall-clock time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        self.controls.handle_all(&self.input.drain());
        frame::run_frame(
            &mut self.state,
            &self.rules,
            now_ms,
            &mut self.controls,
            &mut self.renderer,
        );
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.controls.set_viewport(width as f32, height as f32);
        frame::resize(&mut self.state, &mut self.renderer, width, height);
    }

    // ---- Label one-shot ----

    /// Typeface the host should load, while the label is outstanding.
    pub fn label_font_url(&self) -> Option<&str> {
        self.label.as_ref().map(|p| p.label().font_url.as_str())
    }

    /// The host finished loading the typeface.
    pub fn label_font_loaded(&mut self) {
        if let Some(promise) = self.label.take() {
            promise.resolve();
        }
    }

    /// The host failed to load the typeface; the label is dropped.
    pub fn label_font_failed(&mut self) {
        if let Some(promise) = self.label.take() {
            log::warn!("label: font {} failed to load", promise.label().font_url);
            promise.reject();
        }
    }

    /// Text of the label once it is in the scene.
    pub fn label_text(&self) -> Option<&str> {
        self.state.label().map(|l| l.text.as_str())
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.renderer.frame_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.renderer.frame_len() as u32
    }

    pub fn instance_count(&self) -> u32 {
        self.renderer.instance_count() as u32
    }

    pub fn light_count(&self) -> u32 {
        self.renderer.light_count() as u32
    }

    pub fn cloud_count(&self) -> u32 {
        self.state.clouds.len() as u32
    }

    pub fn cloud_ptr(&self, index: u32) -> *const f32 {
        self.state
            .cloud(CloudId(index))
            .map_or(std::ptr::null(), |c| c.as_ptr())
    }

    /// Length of a cloud's buffer in floats (3 per point).
    pub fn cloud_len(&self, index: u32) -> u32 {
        self.state
            .cloud(CloudId(index))
            .map_or(0, |c| c.as_slice().len() as u32)
    }

    /// Whether a cloud changed in the last frame and must be re-uploaded.
    pub fn cloud_dirty(&self, index: u32) -> bool {
        self.renderer.cloud_dirty(index as usize)
    }

    /// Object drawing a cloud; 0 when there is none (IDs start at 1).
    pub fn cloud_owner(&self, index: u32) -> u32 {
        self.state.cloud_owner(CloudId(index)).map_or(0, |id| id.0)
    }

    pub fn generation(&self) -> u32 {
        self.state.generation()
    }

    /// Scene manifest as JSON, rebuilt only when the generation changes.
    pub fn manifest_json(&mut self) -> &str {
        let generation = self.state.generation();
        if self.manifest_generation != Some(generation) {
            match SceneManifest::describe(&self.state).to_json() {
                Ok(json) => self.manifest_json = json,
                Err(e) => log::warn!("manifest: {}", e),
            }
            self.manifest_generation = Some(generation);
        }
        &self.manifest_json
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.renderer.layout().max_instances as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.renderer.layout().max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.renderer.layout().buffer_total_floats as u32
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn renderer(&self) -> &BufferRenderer {
        &self.renderer
    }
}

/// Orbit controls as the scenes use them: damped, no screen-space panning,
/// never below the horizon.
fn scene_controls(config: &SceneConfig) -> OrbitControls {
    let mut controls = OrbitControls::new(config.viewport_width, config.viewport_height);
    controls.enable_damping = true;
    controls.damping_factor = ORBIT_DAMPING;
    controls.screen_space_panning = false;
    controls.max_polar_angle = std::f32::consts::FRAC_PI_2;
    controls
}
