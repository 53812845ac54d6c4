/// GlGraphicsDevice - OpenGL implementation of the GraphicsDevice trait
///
/// Issues raw framebuffer and renderbuffer calls on the GL context that is
/// current on the calling thread. Depth and stencil share one
/// `DEPTH24_STENCIL8` renderbuffer.

use gl::types::{GLbitfield, GLenum, GLsizei, GLuint};
use framebuffer_engine::fbengine::device::{
    ClearFlags, FramebufferHandle, NativeTextureId, RenderbufferHandle,
};
use framebuffer_engine::fbengine::{GraphicsDevice, Result};
use framebuffer_engine::glam::Vec4;
use framebuffer_engine::{engine_bail, engine_trace};

use crate::gl_error::{gl_call, release_on_error, SOURCE};

/// OpenGL graphics device
///
/// Stateless: every call acts on the current context's `GL_FRAMEBUFFER`
/// binding point.
#[derive(Debug, Default)]
pub struct GlGraphicsDevice;

impl GlGraphicsDevice {
    /// Create a device for the GL context current on this thread
    ///
    /// GL function pointers must already be loaded (see `load_with`).
    pub fn new() -> Self {
        Self
    }
}

/// `GL_COLOR_ATTACHMENTi` for a color slot
fn color_attachment(slot: u32) -> GLenum {
    gl::COLOR_ATTACHMENT0 + slot
}

/// GL enum list for `glDrawBuffers`; an empty list disables color output
pub(crate) fn draw_buffer_enums(slots: &[u32]) -> Vec<GLenum> {
    if slots.is_empty() {
        return vec![gl::NONE];
    }
    slots.iter().map(|&slot| color_attachment(slot)).collect()
}

/// `glClear` mask for a set of clear flags
pub(crate) fn clear_mask(flags: ClearFlags) -> GLbitfield {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= gl::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= gl::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= gl::STENCIL_BUFFER_BIT;
    }
    mask
}

impl GraphicsDevice for GlGraphicsDevice {
    fn create_framebuffer(&mut self, width: u32, height: u32) -> Result<FramebufferHandle> {
        let mut name: GLuint = 0;
        unsafe { gl_call!(GenFramebuffers(1, &mut name))? };
        if name == 0 {
            engine_bail!(SOURCE, "glGenFramebuffers returned no name");
        }

        engine_trace!(SOURCE, "Generated framebuffer {} for {}x{}", name, width, height);
        Ok(FramebufferHandle(name))
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle) -> Result<()> {
        unsafe { gl_call!(DeleteFramebuffers(1, &framebuffer.0)) }
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) -> Result<()> {
        let name = framebuffer.map_or(0, |handle| handle.0);
        unsafe { gl_call!(BindFramebuffer(gl::FRAMEBUFFER, name)) }
    }

    fn attach_color_texture(
        &mut self,
        _framebuffer: FramebufferHandle,
        slot: u32,
        texture: Option<NativeTextureId>,
    ) -> Result<()> {
        let name = texture.map_or(0, |native| native.0);
        unsafe {
            gl_call!(FramebufferTexture2D(
                gl::FRAMEBUFFER,
                color_attachment(slot),
                gl::TEXTURE_2D,
                name,
                0,
            ))
        }
    }

    fn set_draw_buffers(&mut self, slots: &[u32]) -> Result<()> {
        let buffers = draw_buffer_enums(slots);
        unsafe { gl_call!(DrawBuffers(buffers.len() as GLsizei, buffers.as_ptr())) }
    }

    fn clear(&mut self, color: Vec4, depth: f32, flags: ClearFlags) -> Result<()> {
        unsafe {
            if flags.contains(ClearFlags::COLOR) {
                gl_call!(ClearColor(color.x, color.y, color.z, color.w))?;
            }
            if flags.contains(ClearFlags::DEPTH) {
                gl_call!(ClearDepth(depth as f64))?;
            }
            gl_call!(Clear(clear_mask(flags)))
        }
    }

    fn create_depth_stencil(&mut self, width: u32, height: u32) -> Result<RenderbufferHandle> {
        let mut name: GLuint = 0;
        unsafe {
            gl_call!(GenRenderbuffers(1, &mut name))?;
            let storage = gl_call!(BindRenderbuffer(gl::RENDERBUFFER, name)).and_then(|()| {
                gl_call!(RenderbufferStorage(
                    gl::RENDERBUFFER,
                    gl::DEPTH24_STENCIL8,
                    width as GLsizei,
                    height as GLsizei,
                ))
            });
            gl::BindRenderbuffer(gl::RENDERBUFFER, 0);
            release_on_error(storage, || gl::DeleteRenderbuffers(1, &name))?;
        }

        engine_trace!(SOURCE, "Allocated depth-stencil renderbuffer {} ({}x{})", name, width, height);
        Ok(RenderbufferHandle(name))
    }

    fn attach_depth_stencil(
        &mut self,
        _framebuffer: FramebufferHandle,
        storage: Option<RenderbufferHandle>,
    ) -> Result<()> {
        let name = storage.map_or(0, |handle| handle.0);
        unsafe {
            gl_call!(FramebufferRenderbuffer(
                gl::FRAMEBUFFER,
                gl::DEPTH_STENCIL_ATTACHMENT,
                gl::RENDERBUFFER,
                name,
            ))
        }
    }

    fn delete_depth_stencil(&mut self, storage: RenderbufferHandle) -> Result<()> {
        unsafe { gl_call!(DeleteRenderbuffers(1, &storage.0)) }
    }
}

#[cfg(test)]
#[path = "gl_graphics_device_tests.rs"]
mod tests;
