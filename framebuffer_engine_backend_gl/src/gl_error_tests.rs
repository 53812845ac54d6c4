/// Tests for GL error mapping (no GL context required)

use super::*;

#[test]
fn test_gl_error_names() {
    assert_eq!(gl_error_name(gl::NO_ERROR), "GL_NO_ERROR");
    assert_eq!(gl_error_name(gl::INVALID_ENUM), "GL_INVALID_ENUM");
    assert_eq!(gl_error_name(gl::INVALID_VALUE), "GL_INVALID_VALUE");
    assert_eq!(gl_error_name(gl::INVALID_OPERATION), "GL_INVALID_OPERATION");
    assert_eq!(gl_error_name(gl::INVALID_FRAMEBUFFER_OPERATION), "GL_INVALID_FRAMEBUFFER_OPERATION");
    assert_eq!(gl_error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
    assert_eq!(gl_error_name(0x0507), "GL_CONTEXT_LOST");
}

#[test]
fn test_unknown_gl_error_name() {
    assert_eq!(gl_error_name(0xBEEF), "unknown GL error");
}

#[test]
fn test_map_no_error() {
    assert!(map_error("BindFramebuffer", gl::NO_ERROR).is_ok());
}

#[test]
fn test_map_out_of_memory() {
    let result = map_error("RenderbufferStorage", gl::OUT_OF_MEMORY);
    assert!(matches!(result, Err(Error::OutOfMemory)));
}

#[test]
fn test_map_backend_error_names_call_and_code() {
    match map_error("FramebufferTexture2D", gl::INVALID_OPERATION) {
        Err(Error::BackendError(message)) => {
            assert!(message.contains("glFramebufferTexture2D"));
            assert!(message.contains("GL_INVALID_OPERATION"));
            assert!(message.contains("0x0502"));
        }
        other => panic!("expected BackendError, got {:?}", other),
    }
}

#[test]
fn test_release_on_error_runs_release_on_failure() {
    let mut released = false;
    let result: Result<u32> = release_on_error(Err(Error::OutOfMemory), || released = true);

    assert!(released);
    assert!(matches!(result, Err(Error::OutOfMemory)));
}

#[test]
fn test_release_on_error_keeps_successful_value() {
    let mut released = false;
    let result = release_on_error(Ok(7u32), || released = true);

    assert!(!released);
    assert_eq!(result.unwrap(), 7);
}
