use super::mesh::Mesh;
use crate::internal::context::{GraphicsContext, SetUniform};

/// A loaded asset: a list of meshes drawn in order. Each mesh exclusively
/// owns its buffer triple; the model just forwards draw calls.
pub struct Model<C: GraphicsContext> {
    pub meshes: Vec<Mesh<C>>,
}

impl<C: GraphicsContext> Model<C> {
    pub fn draw(&self, shader: &impl SetUniform) {
        for mesh in &self.meshes {
            mesh.draw(shader);
        }
    }
}
