pub mod buffer;
pub mod camera;
pub mod controls;
pub mod instance;
pub mod traits;
