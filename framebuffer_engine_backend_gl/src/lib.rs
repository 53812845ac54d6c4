/*!
# Framebuffer Engine - OpenGL Backend

OpenGL implementation of the framebuffer engine collaborator traits.

This crate provides the graphics device, context and texture binder that
the `TargetManager` drives, using the `gl` crate for raw GL bindings.
Every GL call is followed by a `glGetError` check.

All types act on the GL context current on the calling thread; GL
function pointers must be loaded with [`load_with`] first.
*/

// OpenGL implementation modules
mod gl_error;
mod gl_graphics_device;
mod gl_context;
mod gl_texture_binder;

pub use gl_error::gl_error_name;
pub use gl_graphics_device::GlGraphicsDevice;
pub use gl_context::{GlContext, capabilities_from_limits};
pub use gl_texture_binder::GlTextureBinder;

/// Load GL function pointers through the windowing layer's loader
///
/// # Example
///
/// ```ignore
/// framebuffer_engine_backend_gl::load_with(|symbol| window.get_proc_address(symbol));
/// ```
pub fn load_with<F>(loader: F)
where
    F: FnMut(&'static str) -> *const std::os::raw::c_void,
{
    gl::load_with(loader);
}

// Main fbengine namespace module for the GL backend
pub mod fbengine {
    pub use crate::{
        GlGraphicsDevice, GlContext, GlTextureBinder,
        gl_error_name, capabilities_from_limits, load_with,
    };
}
