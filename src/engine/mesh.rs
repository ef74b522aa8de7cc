use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::texture::{TextureKind, TextureRef};
use super::vertex::{vertex_stride, ModelVertex, VERTEX_ATTRIBUTES};
use crate::internal::context::{DeviceError, GraphicsContext, SetUniform};

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("malformed geometry: {0}")]
    MalformedGeometry(String),
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// A GPU-backed drawable unit: one vertex buffer, one index buffer, one
/// vertex array and an ordered list of texture references. Geometry is
/// uploaded once at construction and never mutated afterwards.
pub struct Mesh<C: GraphicsContext> {
    context: Arc<C>,
    vertices: Vec<ModelVertex>,
    indices: Vec<u32>,
    textures: Vec<TextureRef<C>>,
    vertex_buffer: C::Buffer,
    index_buffer: C::Buffer,
    vertex_array: C::VertexArray,
}

impl<C: GraphicsContext> Mesh<C> {
    /// Validates the geometry, allocates the buffer triple and uploads the
    /// vertex and index data as static buffers. Indices must form whole
    /// triangles and stay inside the vertex sequence; an empty mesh is
    /// valid and draws zero elements.
    pub fn new(
        context: Arc<C>,
        vertices: Vec<ModelVertex>,
        indices: Vec<u32>,
        textures: Vec<TextureRef<C>>,
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::MalformedGeometry(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(MeshError::MalformedGeometry(format!(
                "index {} out of range for {} vertices",
                bad,
                vertices.len()
            )));
        }

        let vertex_buffer = context.create_buffer()?;
        let index_buffer = context.create_buffer()?;
        let vertex_array = context.create_vertex_array()?;

        context.bind_vertex_array(Some(vertex_array));

        context.bind_array_buffer(Some(vertex_buffer));
        context.upload_array_buffer(bytemuck::cast_slice(&vertices));

        context.bind_element_buffer(Some(index_buffer));
        context.upload_element_buffer(bytemuck::cast_slice(&indices));

        let stride = vertex_stride() as i32;
        for attribute in VERTEX_ATTRIBUTES {
            context.set_vertex_attribute(
                attribute.slot,
                attribute.components,
                stride,
                attribute.offset as i32,
            );
        }

        context.bind_vertex_array(None);

        Ok(Self {
            context,
            vertices,
            indices,
            textures,
            vertex_buffer,
            index_buffer,
            vertex_array,
        })
    }

    /// Draws the mesh with the given shader already active. Textures are
    /// bound to texture units in sequence order; the sampler uniform name is
    /// the kind stem plus a per-kind counter, so two diffuse maps become
    /// material.diffuse1 and material.diffuse2. The active unit and vertex
    /// array binding are reset afterwards so sibling draws start clean.
    pub fn draw(&self, shader: &impl SetUniform) {
        let mut counters: HashMap<TextureKind, u32> = HashMap::new();

        for (unit, texture) in self.textures.iter().enumerate() {
            self.context.set_active_texture_unit(unit as u32);

            let counter = counters
                .entry(texture.kind)
                .and_modify(|n| *n += 1)
                .or_insert(1);
            let name = format!("material.{}{}", texture.kind.uniform_stem(), counter);
            shader.set_int(&name, unit as i32);

            self.context.bind_texture_2d(Some(texture.id));
        }
        self.context.set_active_texture_unit(0);

        self.context.bind_vertex_array(Some(self.vertex_array));
        self.context.draw_indexed_triangles(self.indices.len() as i32);
        self.context.bind_vertex_array(None);
    }

    pub fn vertices(&self) -> &[ModelVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

impl<C: GraphicsContext> Drop for Mesh<C> {
    fn drop(&mut self) {
        self.context.delete_buffer(self.vertex_buffer);
        self.context.delete_buffer(self.index_buffer);
        self.context.delete_vertex_array(self.vertex_array);
    }
}
