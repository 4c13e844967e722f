use wasm_bindgen::prelude::*;

mod scene;
use scene::DeepSpace;

astra_web::export_scene!(DeepSpace, "deep-space");
