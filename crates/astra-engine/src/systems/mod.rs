pub mod animate;
pub mod blink;
pub mod frame;
pub mod render;
