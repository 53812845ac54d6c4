/// GlTextureBinder - OpenGL implementation of the TextureBinder trait
///
/// Keeps a table of logical RGBA8 textures. The GL texture object of each
/// one is created on first bind (or after the context was replaced) and
/// the binder remembers which texture unit every native texture sits on,
/// so `unbind_texture` only touches the units that actually hold it.

use std::ffi::c_void;
use std::ptr;
use gl::types::{GLint, GLsizei, GLuint};
use rustc_hash::FxHashMap;
use framebuffer_engine::fbengine::device::{NativeTextureId, TextureId};
use framebuffer_engine::fbengine::{Result, TextureBinder};
use framebuffer_engine::{engine_debug, engine_err, engine_warn};

use crate::gl_error::{gl_call, release_on_error, SOURCE};

#[derive(Debug)]
struct GlTexture {
    width: u32,
    height: u32,
    /// RGBA8 texels, `None` for render-only textures
    pixels: Option<Vec<u8>>,
    native: Option<NativeTextureId>,
    /// Pixels changed since the last upload
    dirty: bool,
}

/// OpenGL texture binder
#[derive(Debug, Default)]
pub struct GlTextureBinder {
    textures: FxHashMap<TextureId, GlTexture>,
    /// Native texture currently bound to each texture unit
    units: FxHashMap<u32, NativeTextureId>,
}

impl GlTextureBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a render-only texture (no initial contents)
    ///
    /// Re-registering an id replaces its description; the GL object is
    /// recreated on next bind.
    pub fn register(&mut self, id: TextureId, width: u32, height: u32) -> Result<()> {
        self.insert(id, width, height, None)
    }

    /// Register a texture with RGBA8 contents
    pub fn register_with_pixels(
        &mut self,
        id: TextureId,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<()> {
        check_pixels(id, width, height, &pixels)?;
        self.insert(id, width, height, Some(pixels))
    }

    /// Replace the contents of a registered texture; uploaded on next bind
    pub fn update_pixels(&mut self, id: TextureId, pixels: Vec<u8>) -> Result<()> {
        let texture = self.textures.get_mut(&id).ok_or_else(|| engine_err!(SOURCE, InvalidResource,
            "{} is not registered", id))?;
        check_pixels(id, texture.width, texture.height, &pixels)?;
        texture.pixels = Some(pixels);
        texture.dirty = true;
        Ok(())
    }

    /// Forget a texture and delete its GL object
    pub fn remove(&mut self, id: TextureId) -> Result<()> {
        if let Some(texture) = self.textures.remove(&id) {
            if let Some(native) = texture.native {
                self.unbind_texture(native);
                unsafe { gl_call!(DeleteTextures(1, &native.0))? };
            }
        }
        Ok(())
    }

    /// Forget every GL object after the context was replaced
    ///
    /// Registrations survive; objects are recreated on next bind.
    pub fn on_context_lost(&mut self) {
        for texture in self.textures.values_mut() {
            texture.native = None;
            texture.dirty = texture.pixels.is_some();
        }
        self.units.clear();
    }

    pub fn is_registered(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    /// Native texture of a registered texture, if already created
    pub fn native(&self, id: TextureId) -> Option<NativeTextureId> {
        self.textures.get(&id).and_then(|texture| texture.native)
    }

    /// Native texture bound to `unit`, as last recorded by this binder
    pub fn bound_on_unit(&self, unit: u32) -> Option<NativeTextureId> {
        self.units.get(&unit).copied()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn insert(&mut self, id: TextureId, width: u32, height: u32, pixels: Option<Vec<u8>>) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(engine_err!(SOURCE, InvalidResource,
                "{} has zero size {}x{}", id, width, height));
        }
        if let Some(previous) = self.textures.get(&id).and_then(|texture| texture.native) {
            self.unbind_texture(previous);
            unsafe { gl_call!(DeleteTextures(1, &previous.0))? };
        }

        let dirty = pixels.is_some();
        self.textures.insert(id, GlTexture { width, height, pixels, native: None, dirty });
        Ok(())
    }
}

fn check_pixels(id: TextureId, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(engine_err!(SOURCE, InvalidResource,
            "{}: expected {} bytes of RGBA8 data, got {}", id, expected, pixels.len()));
    }
    Ok(())
}

/// Allocate storage for `texture` on the currently bound `GL_TEXTURE_2D`
///
/// # Safety
///
/// A GL context must be current and the target texture bound.
unsafe fn upload(texture: &GlTexture) -> Result<()> {
    let data: *const c_void = texture
        .pixels
        .as_ref()
        .map_or(ptr::null(), |pixels| pixels.as_ptr().cast());

    gl_call!(TexImage2D(
        gl::TEXTURE_2D,
        0,
        gl::RGBA8 as GLint,
        texture.width as GLsizei,
        texture.height as GLsizei,
        0,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        data,
    ))
}

/// Configure a freshly generated texture name and allocate its storage
///
/// # Safety
///
/// A GL context must be current.
unsafe fn allocate(texture: &GlTexture, name: GLuint) -> Result<()> {
    gl_call!(BindTexture(gl::TEXTURE_2D, name))?;
    gl_call!(TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint))?;
    gl_call!(TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint))?;
    gl_call!(TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint))?;
    gl_call!(TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint))?;
    upload(texture)
}

impl TextureBinder for GlTextureBinder {
    fn bind_texture(&mut self, id: TextureId, unit: u32) -> Result<NativeTextureId> {
        let texture = self.textures.get_mut(&id).ok_or_else(|| engine_err!(SOURCE, InvalidResource,
            "{} is not registered", id))?;

        unsafe {
            gl_call!(ActiveTexture(gl::TEXTURE0 + unit))?;

            let native = match texture.native {
                Some(native) => {
                    gl_call!(BindTexture(gl::TEXTURE_2D, native.0))?;
                    if texture.dirty {
                        upload(texture)?;
                    }
                    native
                }
                None => {
                    let mut name: GLuint = 0;
                    gl_call!(GenTextures(1, &mut name))?;
                    release_on_error(allocate(texture, name), || gl::DeleteTextures(1, &name))?;

                    let native = NativeTextureId(name);
                    texture.native = Some(native);
                    engine_debug!(SOURCE, "Created {} for {} ({}x{})",
                        native, id, texture.width, texture.height);
                    native
                }
            };

            texture.dirty = false;
            self.units.insert(unit, native);
            Ok(native)
        }
    }

    fn unbind_texture(&mut self, texture: NativeTextureId) {
        let units: Vec<u32> = self
            .units
            .iter()
            .filter(|(_, bound)| **bound == texture)
            .map(|(unit, _)| *unit)
            .collect();

        for unit in units {
            let result = unsafe {
                gl_call!(ActiveTexture(gl::TEXTURE0 + unit))
                    .and_then(|()| gl_call!(BindTexture(gl::TEXTURE_2D, 0)))
            };
            if result.is_err() {
                engine_warn!(SOURCE, "Could not release {} from texture unit {}", texture, unit);
            }
            self.units.remove(&unit);
        }
    }
}

#[cfg(test)]
#[path = "gl_texture_binder_tests.rs"]
mod tests;
