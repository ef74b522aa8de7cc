use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use eframe::glow::{self, HasContext};

use super::texture::{TextureKind, TextureRef};

/// Decodes image files and uploads them as mipmapped RGBA8 GL textures.
/// Owns the texture memory; meshes only get handles. Uploads are cached per
/// path so a map shared by several meshes hits the GPU once.
pub struct TextureLoader {
    gl: Arc<glow::Context>,
    loaded: HashMap<PathBuf, glow::Texture>,
    solids: HashMap<[u8; 4], glow::Texture>,
}

impl TextureLoader {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self {
            gl,
            loaded: HashMap::new(),
            solids: HashMap::new(),
        }
    }

    pub fn load(&mut self, path: &Path, kind: TextureKind) -> Result<TextureRef<glow::Context>> {
        if let Some(&id) = self.loaded.get(path) {
            return Ok(TextureRef { id, kind });
        }

        let image = image::open(path)
            .with_context(|| format!("reading texture {}", path.display()))?
            .flipv()
            .to_rgba8();
        let (width, height) = image.dimensions();

        let id = upload_rgba(&self.gl, width, height, &image)?;
        log::info!("loaded texture {} ({width}x{height})", path.display());

        self.loaded.insert(path.to_owned(), id);
        Ok(TextureRef { id, kind })
    }

    /// 1x1 fallback for materials with no map of the requested kind.
    pub fn solid_color(
        &mut self,
        rgba: [u8; 4],
        kind: TextureKind,
    ) -> Result<TextureRef<glow::Context>> {
        if let Some(&id) = self.solids.get(&rgba) {
            return Ok(TextureRef { id, kind });
        }

        let id = upload_rgba(&self.gl, 1, 1, &rgba)?;
        self.solids.insert(rgba, id);
        Ok(TextureRef { id, kind })
    }

    pub fn destroy(&mut self) {
        for (_, id) in self.loaded.drain() {
            unsafe { self.gl.delete_texture(id) }
        }
        for (_, id) in self.solids.drain() {
            unsafe { self.gl.delete_texture(id) }
        }
    }
}

fn upload_rgba(gl: &glow::Context, width: u32, height: u32, pixels: &[u8]) -> Result<glow::Texture> {
    unsafe {
        let texture = gl.create_texture().map_err(|e| anyhow!(e))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            width as i32,
            height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            Some(pixels),
        );
        gl.generate_mipmap(glow::TEXTURE_2D);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR_MIPMAP_LINEAR as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::LINEAR as i32,
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(texture)
    }
}
