pub mod mesh;
pub mod transform;
