pub mod label;
pub mod light;
pub mod mesh;
pub mod object;
pub mod point_cloud;
pub mod transform;
