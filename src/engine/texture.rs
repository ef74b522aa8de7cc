use crate::internal::context::GraphicsContext;

/// Semantic role of a texture; decides which sampler uniform it feeds at
/// draw time (`material.diffuse1`, `material.specular1`, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
}

impl TextureKind {
    pub fn uniform_stem(self) -> &'static str {
        match self {
            TextureKind::Diffuse => "diffuse",
            TextureKind::Specular => "specular",
        }
    }
}

/// Handle plus role. The image memory belongs to whichever loader created
/// it; meshes only hold references for binding.
#[derive(Debug)]
pub struct TextureRef<C: GraphicsContext> {
    pub id: C::Texture,
    pub kind: TextureKind,
}

impl<C: GraphicsContext> Clone for TextureRef<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: GraphicsContext> Copy for TextureRef<C> {}
