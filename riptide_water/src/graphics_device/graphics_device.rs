/// GraphicsDevice trait - the GPU API consumed by the water pipeline
///
/// Modeled on a bind-to-edit API (OpenGL / WebGL2): one framebuffer is bound
/// at a time, clip-plane and viewport are global state, and textures are
/// bound to numbered sampler slots. Backends implement this trait; tests use
/// a resource-counting mock.

use std::sync::Arc;
use glam::Vec4;
use crate::error::Result;
use crate::camera::RenderView;
use super::{
    Texture, TextureDesc, Renderbuffer, RenderbufferDesc,
    Framebuffer, FramebufferDesc, Viewport, ClearFlags, ClearValue,
};

/// GPU API used by render targets, passes and the compositor
///
/// Resource creation returns `ResourceExhaustion` when the device runs out
/// of memory. Destroying a resource twice returns `InvalidResource`.
pub trait GraphicsDevice: Send {
    // ===== RESOURCES =====

    /// Allocate a 2D texture
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Allocate a depth renderbuffer
    fn create_renderbuffer(&mut self, desc: &RenderbufferDesc) -> Result<Arc<dyn Renderbuffer>>;

    /// Assemble a framebuffer from existing attachments
    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;

    /// Release a texture
    fn destroy_texture(&mut self, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Release a renderbuffer
    fn destroy_renderbuffer(&mut self, renderbuffer: &Arc<dyn Renderbuffer>) -> Result<()>;

    /// Release a framebuffer (attachments are released separately)
    fn destroy_framebuffer(&mut self, framebuffer: &Arc<dyn Framebuffer>) -> Result<()>;

    // ===== STATE =====

    /// Make `framebuffer` the render destination; `None` selects the default
    /// (window) framebuffer
    fn bind_framebuffer(&mut self, framebuffer: Option<&Arc<dyn Framebuffer>>) -> Result<()>;

    /// Set the viewport of the bound framebuffer
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Clear the bound framebuffer
    fn clear(&mut self, flags: ClearFlags, value: ClearValue) -> Result<()>;

    /// Enable the single user clip plane (world-space equation)
    fn enable_clip_plane(&mut self, equation: Vec4) -> Result<()>;

    /// Disable the user clip plane
    fn disable_clip_plane(&mut self) -> Result<()>;

    /// Upload view and projection for subsequent draws
    fn set_view(&mut self, view: &RenderView) -> Result<()>;

    /// Bind (or clear with `None`) a texture on a sampler slot
    fn bind_texture(&mut self, slot: u32, texture: Option<&Arc<dyn Texture>>) -> Result<()>;

    /// Upload a raw uniform block for subsequent draws
    fn push_constants(&mut self, data: &[u8]) -> Result<()>;

    // ===== DRAW =====

    /// Draw indexed triangles from the currently bound geometry
    fn draw_indexed(&mut self, index_count: u32, first_index: u32) -> Result<()>;
}
