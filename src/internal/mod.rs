pub mod camera;
pub mod context;
pub mod scene;
