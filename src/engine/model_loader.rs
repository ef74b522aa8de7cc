use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use eframe::glow;

use super::mesh::Mesh;
use super::model::Model;
use super::texture::{TextureKind, TextureRef};
use super::texture_loader::TextureLoader;
use super::vertex::ModelVertex;

/// Parses an OBJ file into a GPU-resident model. The loader guarantees the
/// contract the mesh relies on: indices reference the assembled vertex
/// stream, and every mesh carries at least a diffuse texture (a white
/// fallback when the material has none).
pub fn load_model(
    gl: Arc<glow::Context>,
    path: &Path,
    textures: &mut TextureLoader,
) -> Result<Model<glow::Context>> {
    let (raw_meshes, raw_materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)
        .with_context(|| format!("reading model {}", path.display()))?;
    let materials =
        raw_materials.with_context(|| format!("reading materials for {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let mut meshes = Vec::with_capacity(raw_meshes.len());

    for raw in &raw_meshes {
        let mesh = &raw.mesh;
        let vertex_count = mesh.positions.len() / 3;

        let mut vertices = Vec::with_capacity(vertex_count);
        for i in 0..vertex_count {
            vertices.push(ModelVertex {
                position: [
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                ],
                normal: if mesh.normals.is_empty() {
                    [0.0, 1.0, 0.0]
                } else {
                    [
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    ]
                },
                tex_coords: if mesh.texcoords.is_empty() {
                    [0.0, 0.0]
                } else {
                    [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                },
            });
        }

        let mut refs: Vec<TextureRef<glow::Context>> = Vec::new();
        if let Some(material_id) = mesh.material_id {
            let material = &materials[material_id];
            if !material.diffuse_texture.is_empty() {
                refs.push(textures.load(&base.join(&material.diffuse_texture), TextureKind::Diffuse)?);
            }
            if !material.specular_texture.is_empty() {
                refs.push(
                    textures.load(&base.join(&material.specular_texture), TextureKind::Specular)?,
                );
            }
        }
        if !refs.iter().any(|t| t.kind == TextureKind::Diffuse) {
            refs.insert(
                0,
                textures.solid_color([255, 255, 255, 255], TextureKind::Diffuse)?,
            );
        }

        meshes.push(Mesh::new(
            gl.clone(),
            vertices,
            mesh.indices.clone(),
            refs,
        )?);
    }

    log::info!(
        "loaded {} ({} meshes, {} materials)",
        path.display(),
        meshes.len(),
        materials.len()
    );

    Ok(Model { meshes })
}
