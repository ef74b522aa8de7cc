pub mod mesh;
pub mod model;
pub mod model_loader;
pub mod shader;
pub mod texture;
pub mod texture_loader;
pub mod vertex;
