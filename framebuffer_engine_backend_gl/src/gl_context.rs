/// GlContext - OpenGL implementation of the GraphicsContext trait
///
/// Wraps the GL context current on the calling thread. A new `GlContext`
/// must be created every time the windowing layer creates or restores a
/// context: each one gets a fresh identity, which is what tells the
/// target manager that earlier framebuffer names are gone.

use std::sync::atomic::{AtomicU64, Ordering};
use gl::types::GLint;
use framebuffer_engine::fbengine::device::{ContextId, RenderTargetCapabilities};
use framebuffer_engine::fbengine::{GraphicsContext, Result};
use framebuffer_engine::{engine_err, engine_info};

use crate::gl_error::{gl_call, SOURCE};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// OpenGL context identity and capabilities
#[derive(Debug, Clone, Copy)]
pub struct GlContext {
    id: ContextId,
    capabilities: RenderTargetCapabilities,
}

impl GlContext {
    /// Adopt the GL context current on this thread
    ///
    /// Queries `GL_MAX_DRAW_BUFFERS` and `GL_MAX_COLOR_ATTACHMENTS` once.
    ///
    /// # Errors
    ///
    /// Returns `InitializationFailed` if GL function pointers were not loaded.
    pub fn current() -> Result<Self> {
        if !gl::GetIntegerv::is_loaded() {
            return Err(engine_err!(SOURCE, InitializationFailed,
                "GL functions not loaded, call load_with first"));
        }

        let mut max_draw_buffers: GLint = 0;
        let mut max_color_attachments: GLint = 0;
        unsafe {
            gl_call!(GetIntegerv(gl::MAX_DRAW_BUFFERS, &mut max_draw_buffers))?;
            gl_call!(GetIntegerv(gl::MAX_COLOR_ATTACHMENTS, &mut max_color_attachments))?;
        }

        let id = ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed));
        let capabilities = capabilities_from_limits(max_draw_buffers, max_color_attachments);

        engine_info!(SOURCE,
            "Adopted GL {} (draw buffers: {}, color attachments: {})",
            id, max_draw_buffers, max_color_attachments);

        Ok(Self { id, capabilities })
    }
}

impl GraphicsContext for GlContext {
    fn context_id(&self) -> ContextId {
        self.id
    }

    fn capabilities(&self) -> RenderTargetCapabilities {
        self.capabilities
    }
}

/// Resolve render-target capabilities from the GL implementation limits
///
/// Multiple render targets need more than one draw buffer; the usable
/// slot count is bounded by both limits.
pub fn capabilities_from_limits(
    max_draw_buffers: GLint,
    max_color_attachments: GLint,
) -> RenderTargetCapabilities {
    let usable = max_draw_buffers.min(max_color_attachments);
    if usable > 1 {
        RenderTargetCapabilities::multiple_targets(usable as u32)
    } else {
        RenderTargetCapabilities::single_target()
    }
}

#[cfg(test)]
#[path = "gl_context_tests.rs"]
mod tests;
