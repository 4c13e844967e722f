pub mod runner;

pub use runner::SceneRunner;

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_tick, input handlers,
///   label callbacks, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use astra_engine::*;
///
/// mod scene;
/// use scene::MyScene;
///
/// astra_web::export_scene!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$setup_type`: The scene struct that implements `astra_engine::SceneSetup`
///   and has a `new()` constructor
/// - `$scene_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_scene {
    ($setup_type:ty, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner<$setup_type>>> = RefCell::new(None);
        }

        /// Run `f` against the runner. Returns `None` before `scene_init()`.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner<$setup_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call scene_init() first", $scene_name);
                        None
                    }
                }
            })
        }

        fn install(runner: $crate::SceneRunner<$setup_type>) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
        }

        fn init_logging() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        }

        #[wasm_bindgen]
        pub fn scene_init() {
            init_logging();
            install($crate::SceneRunner::new(<$setup_type>::new()));
            with_runner(|r| r.init());
            log::info!("{}: initialized", $scene_name);
        }

        /// Like `scene_init`, with a JSON `SceneConfig` override from the page.
        #[wasm_bindgen]
        pub fn scene_init_with_config(json: &str) {
            init_logging();
            install($crate::SceneRunner::new(<$setup_type>::new()));
            with_runner(|r| r.init_with_config(json));
            log::info!("{}: initialized", $scene_name);
        }

        /// Advance one display frame using the browser's wall clock.
        #[wasm_bindgen]
        pub fn scene_tick() {
            let now_ms = js_sys::Date::now();
            with_runner(|r| r.tick(now_ms));
        }

        #[wasm_bindgen]
        pub fn scene_resize(width: u32, height: u32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_down(x: f32, y: f32, button: u32) {
            let button = astra_engine::PointerButton::from_dom(button);
            with_runner(|r| r.push_input(astra_engine::InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(astra_engine::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(astra_engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(astra_engine::InputEvent::Wheel { delta_y }));
        }

        // ---- Label one-shot ----

        /// Typeface URL to load, or an empty string when no label is pending.
        #[wasm_bindgen]
        pub fn get_label_font_url() -> String {
            with_runner(|r| r.label_font_url().map(str::to_owned))
                .flatten()
                .unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn scene_label_font_loaded() {
            with_runner(|r| r.label_font_loaded());
        }

        #[wasm_bindgen]
        pub fn scene_label_font_failed() {
            with_runner(|r| r.label_font_failed());
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_scene_generation() -> u32 {
            with_runner(|r| r.generation()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_scene_manifest() -> String {
            with_runner(|r| r.manifest_json().to_owned()).unwrap_or_default()
        }

        // ---- Point cloud accessors ----

        #[wasm_bindgen]
        pub fn get_cloud_count() -> u32 {
            with_runner(|r| r.cloud_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_cloud_ptr(index: u32) -> *const f32 {
            with_runner(|r| r.cloud_ptr(index)).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_cloud_len(index: u32) -> u32 {
            with_runner(|r| r.cloud_len(index)).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_cloud_owner(index: u32) -> u32 {
            with_runner(|r| r.cloud_owner(index)).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn is_cloud_dirty(index: u32) -> bool {
            with_runner(|r| r.cloud_dirty(index)).unwrap_or(false)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
