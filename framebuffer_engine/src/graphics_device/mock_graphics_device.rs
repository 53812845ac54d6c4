/// Mock collaborators for unit tests (no GPU required)
///
/// The mock device and texture binder record every call in a shared
/// vector so tests can assert on the exact sequence of GPU commands the
/// target manager issued.

use std::sync::{Arc, Mutex};
use glam::Vec4;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, GraphicsContext, TextureBinder,
    ClearFlags, ContextId, RenderTargetCapabilities,
    FramebufferHandle, RenderbufferHandle, TextureId, NativeTextureId,
};

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateFramebuffer { handle: FramebufferHandle, width: u32, height: u32 },
    DeleteFramebuffer(FramebufferHandle),
    BindFramebuffer(Option<FramebufferHandle>),
    AttachColor { framebuffer: FramebufferHandle, slot: u32, texture: Option<NativeTextureId> },
    SetDrawBuffers(Vec<u32>),
    Clear { color: [f32; 4], depth: f32, flags: ClearFlags },
    CreateDepthStencil { storage: RenderbufferHandle, width: u32, height: u32 },
    AttachDepthStencil { framebuffer: FramebufferHandle, storage: Option<RenderbufferHandle> },
    DeleteDepthStencil(RenderbufferHandle),
}

/// Mock device that hands out sequential handles and records calls
#[derive(Debug)]
pub struct MockGraphicsDevice {
    /// Recorded calls, shared with the test
    pub calls: Arc<Mutex<Vec<DeviceCall>>>,
    /// When set, create_framebuffer fails with OutOfMemory
    pub fail_framebuffer_creation: bool,
    next_framebuffer: u32,
    next_renderbuffer: u32,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_framebuffer_creation: false,
            next_framebuffer: 1,
            next_renderbuffer: 1,
        }
    }

    fn record(&self, call: DeviceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_framebuffer(&mut self, width: u32, height: u32) -> Result<FramebufferHandle> {
        if self.fail_framebuffer_creation {
            return Err(Error::OutOfMemory);
        }
        let handle = FramebufferHandle(self.next_framebuffer);
        self.next_framebuffer += 1;
        self.record(DeviceCall::CreateFramebuffer { handle, width, height });
        Ok(handle)
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle) -> Result<()> {
        self.record(DeviceCall::DeleteFramebuffer(framebuffer));
        Ok(())
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) -> Result<()> {
        self.record(DeviceCall::BindFramebuffer(framebuffer));
        Ok(())
    }

    fn attach_color_texture(
        &mut self,
        framebuffer: FramebufferHandle,
        slot: u32,
        texture: Option<NativeTextureId>,
    ) -> Result<()> {
        self.record(DeviceCall::AttachColor { framebuffer, slot, texture });
        Ok(())
    }

    fn set_draw_buffers(&mut self, slots: &[u32]) -> Result<()> {
        self.record(DeviceCall::SetDrawBuffers(slots.to_vec()));
        Ok(())
    }

    fn clear(&mut self, color: Vec4, depth: f32, flags: ClearFlags) -> Result<()> {
        self.record(DeviceCall::Clear { color: color.to_array(), depth, flags });
        Ok(())
    }

    fn create_depth_stencil(&mut self, width: u32, height: u32) -> Result<RenderbufferHandle> {
        let storage = RenderbufferHandle(self.next_renderbuffer);
        self.next_renderbuffer += 1;
        self.record(DeviceCall::CreateDepthStencil { storage, width, height });
        Ok(storage)
    }

    fn attach_depth_stencil(
        &mut self,
        framebuffer: FramebufferHandle,
        storage: Option<RenderbufferHandle>,
    ) -> Result<()> {
        self.record(DeviceCall::AttachDepthStencil { framebuffer, storage });
        Ok(())
    }

    fn delete_depth_stencil(&mut self, storage: RenderbufferHandle) -> Result<()> {
        self.record(DeviceCall::DeleteDepthStencil(storage));
        Ok(())
    }
}

// ============================================================================
// Mock TextureBinder
// ============================================================================

/// One recorded texture binder call
#[derive(Debug, Clone, PartialEq)]
pub enum TextureCall {
    Bind { texture: TextureId, unit: u32, native: NativeTextureId },
    Unbind(NativeTextureId),
}

/// Mock texture binder
///
/// Native ids are stable per logical texture: `TextureId(n)` maps to
/// `NativeTextureId(100 + n)`, which keeps test expectations readable.
#[derive(Debug)]
pub struct MockTextureBinder {
    /// Recorded calls, shared with the test
    pub calls: Arc<Mutex<Vec<TextureCall>>>,
    /// Unit currently occupied by each native texture
    pub units: Arc<Mutex<FxHashMap<NativeTextureId, u32>>>,
    /// When set, every texture gets this native id (recycled driver name)
    pub recycled_native: Option<NativeTextureId>,
    /// Texture whose bind fails with OutOfMemory, shared with the test
    pub failing_texture: Arc<Mutex<Option<TextureId>>>,
}

impl MockTextureBinder {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            units: Arc::new(Mutex::new(FxHashMap::default())),
            recycled_native: None,
            failing_texture: Arc::new(Mutex::new(None)),
        }
    }

    /// Native id the mock assigns to a logical texture
    pub fn native_of(texture: TextureId) -> NativeTextureId {
        NativeTextureId(100 + texture.0 as u32)
    }
}

impl TextureBinder for MockTextureBinder {
    fn bind_texture(&mut self, texture: TextureId, unit: u32) -> Result<NativeTextureId> {
        if *self.failing_texture.lock().unwrap() == Some(texture) {
            return Err(Error::OutOfMemory);
        }
        let native = self.recycled_native.unwrap_or_else(|| Self::native_of(texture));
        self.units.lock().unwrap().insert(native, unit);
        self.calls.lock().unwrap().push(TextureCall::Bind { texture, unit, native });
        Ok(native)
    }

    fn unbind_texture(&mut self, texture: NativeTextureId) {
        self.units.lock().unwrap().remove(&texture);
        self.calls.lock().unwrap().push(TextureCall::Unbind(texture));
    }
}

// ============================================================================
// Mock GraphicsContext
// ============================================================================

/// Mock context with a fixed identity and capabilities
#[derive(Debug, Clone, Copy)]
pub struct MockContext {
    pub id: ContextId,
    pub capabilities: RenderTargetCapabilities,
}

impl MockContext {
    /// Context without draw-buffers support
    pub fn single_target(id: u64) -> Self {
        Self {
            id: ContextId(id),
            capabilities: RenderTargetCapabilities::single_target(),
        }
    }

    /// Context supporting up to `max` draw buffers
    pub fn multiple_targets(id: u64, max: u32) -> Self {
        Self {
            id: ContextId(id),
            capabilities: RenderTargetCapabilities::multiple_targets(max),
        }
    }
}

impl GraphicsContext for MockContext {
    fn context_id(&self) -> ContextId {
        self.id
    }

    fn capabilities(&self) -> RenderTargetCapabilities {
        self.capabilities
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
