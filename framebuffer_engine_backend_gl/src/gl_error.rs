/// GL error checking
///
/// Every GL call made by the backend goes through `gl_call!`, which reads
/// `glGetError` right after the call and turns a non-zero code into an
/// engine error.

use gl::types::GLenum;
use framebuffer_engine::fbengine::{Error, Result};
use framebuffer_engine::{engine_err, engine_error};

/// Log source for every message emitted by this backend
pub(crate) const SOURCE: &str = "fbengine::gl";

/// `GL_CONTEXT_LOST` (GL 4.5 / KHR_robustness)
const CONTEXT_LOST: GLenum = 0x0507;

/// Readable name of a `glGetError` code
pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "unknown GL error",
    }
}

/// Map a `glGetError` code reported after `call` to an engine result
///
/// `GL_OUT_OF_MEMORY` becomes `Error::OutOfMemory`; the GL state is
/// undefined after it, so the caller must not keep using the context.
pub(crate) fn map_error(call: &str, code: GLenum) -> Result<()> {
    match code {
        gl::NO_ERROR => Ok(()),
        gl::OUT_OF_MEMORY => {
            engine_error!(SOURCE, "gl{} ran out of GPU memory", call);
            Err(Error::OutOfMemory)
        }
        code => Err(engine_err!(SOURCE, BackendError,
            "gl{} failed with {} ({:#06x})", call, gl_error_name(code), code)),
    }
}

/// Read the pending GL error after `call`
pub(crate) fn check(call: &str) -> Result<()> {
    let code = unsafe { gl::GetError() };
    map_error(call, code)
}

/// Pass `result` through, running `release` first when it failed
///
/// Used to delete a freshly generated GL name whose setup failed.
pub(crate) fn release_on_error<T>(result: Result<T>, release: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        release();
    }
    result
}

/// Issue a GL call and check `glGetError` afterwards
///
/// Evaluates to `Result<T>` where `T` is the call's return value.
/// Must be used inside an `unsafe` block.
macro_rules! gl_call {
    ($name:ident($($arg:expr),* $(,)?)) => {{
        let value = ::gl::$name($($arg),*);
        $crate::gl_error::check(stringify!($name)).map(|()| value)
    }};
}

pub(crate) use gl_call;

#[cfg(test)]
#[path = "gl_error_tests.rs"]
mod tests;
