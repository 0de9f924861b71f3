/// Scene drawing callback used by the clipped passes.
///
/// The pipeline never looks inside the scene: it sets up destination, view
/// and clip plane, then hands the device to `draw`. Implementations issue
/// their own draw calls and must not bind framebuffers or touch the clip
/// plane.

use crate::camera::RenderView;
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;

pub trait Scene {
    /// Draw every object of the scene once with the given view.
    ///
    /// An empty scene draws nothing and returns `Ok(())`.
    fn draw(&self, device: &mut dyn GraphicsDevice, view: &RenderView) -> Result<()>;
}

/// Scene with nothing in it
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyScene;

impl Scene for EmptyScene {
    fn draw(&self, _device: &mut dyn GraphicsDevice, _view: &RenderView) -> Result<()> {
        Ok(())
    }
}
