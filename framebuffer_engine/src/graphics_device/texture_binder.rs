/// TextureBinder trait - texture upload/bind collaborator

use std::fmt;
use crate::error::Result;

/// Logical texture handle (context independent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Native texture identity inside one context (e.g. a GL texture name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeTextureId(pub u32);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

impl fmt::Display for NativeTextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}

/// Texture upload/bind manager
///
/// Owns native texture objects. Both calls are idempotent and only
/// touch the named texture unit.
pub trait TextureBinder: Send + Sync {
    /// Bind `texture` to texture unit `unit`
    ///
    /// Creates or refreshes the native texture object if needed and
    /// returns its native identity.
    fn bind_texture(&mut self, texture: TextureId, unit: u32) -> Result<NativeTextureId>;

    /// Release whatever sampler unit `texture` currently occupies
    ///
    /// No-op if the texture is not bound to any unit.
    fn unbind_texture(&mut self, texture: NativeTextureId);
}
