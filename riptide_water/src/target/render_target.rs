/// Render target - one off-screen color surface plus its depth storage.
///
/// A target is either fully initialized or does not exist: if any
/// attachment fails to allocate, the ones already created are released
/// before the error is returned. Dimensions are fixed for the whole
/// lifetime; there is no resize, only destroy + create.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, Texture, TextureDesc, TextureFormat, TextureUsage, SamplerDesc,
    RenderbufferDesc, Framebuffer, FramebufferDesc, DepthAttachment,
};

/// How the depth attachment of a target is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthMode {
    /// Depth renderbuffer; depth is only used for testing
    Renderbuffer,
    /// Depth texture; depth is sampled later (soft water edges)
    Texture,
}

struct Attachments {
    framebuffer: Arc<dyn Framebuffer>,
    color: Arc<dyn Texture>,
    depth: DepthAttachment,
}

pub struct RenderTarget {
    name: String,
    width: u32,
    height: u32,
    depth_mode: DepthMode,
    /// `None` once destroyed
    attachments: Option<Attachments>,
}

impl RenderTarget {
    /// Allocate color + depth attachments and assemble the framebuffer.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError` if `width` or `height` is zero or the
    ///   attachments disagree on size
    /// - `ResourceExhaustion` if the device runs out of memory
    pub fn create(
        device: &mut dyn GraphicsDevice,
        name: &str,
        width: u32,
        height: u32,
        depth_mode: DepthMode,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            engine_bail!(ConfigurationError, "riptide::RenderTarget",
                "RenderTarget '{}' has zero size ({}x{})", name, width, height);
        }

        let color = device.create_texture(&TextureDesc {
            label: format!("{}_color", name),
            width,
            height,
            format: TextureFormat::R8G8B8A8_UNORM,
            usage: TextureUsage::SAMPLED | TextureUsage::RENDER_TARGET,
            sampler: SamplerDesc::LINEAR_CLAMP,
        })?;

        let depth = match Self::create_depth(device, name, width, height, depth_mode) {
            Ok(depth) => depth,
            Err(err) => {
                Self::release_quietly(device, &color, None);
                return Err(err);
            }
        };

        let framebuffer = match device.create_framebuffer(&FramebufferDesc {
            label: name,
            color_attachment: &color,
            depth_attachment: Some(&depth),
        }) {
            Ok(fb) => fb,
            Err(err) => {
                Self::release_quietly(device, &color, Some(&depth));
                return Err(err);
            }
        };

        crate::engine_debug!("riptide::RenderTarget",
            "RenderTarget '{}' created ({}x{}, depth {:?})", name, width, height, depth_mode);

        Ok(Self {
            name: name.to_string(),
            width,
            height,
            depth_mode,
            attachments: Some(Attachments { framebuffer, color, depth }),
        })
    }

    fn create_depth(
        device: &mut dyn GraphicsDevice,
        name: &str,
        width: u32,
        height: u32,
        depth_mode: DepthMode,
    ) -> Result<DepthAttachment> {
        match depth_mode {
            DepthMode::Renderbuffer => {
                let rb = device.create_renderbuffer(&RenderbufferDesc {
                    label: format!("{}_depth", name),
                    width,
                    height,
                    format: TextureFormat::D24_UNORM,
                })?;
                Ok(DepthAttachment::Renderbuffer(rb))
            }
            DepthMode::Texture => {
                let tex = device.create_texture(&TextureDesc {
                    label: format!("{}_depth", name),
                    width,
                    height,
                    format: TextureFormat::D24_UNORM,
                    usage: TextureUsage::SAMPLED | TextureUsage::DEPTH_STENCIL,
                    sampler: SamplerDesc::LINEAR_CLAMP,
                })?;
                Ok(DepthAttachment::Texture(tex))
            }
        }
    }

    /// Release attachments on a failed creation path; the creation error is the one returned
    fn release_quietly(
        device: &mut dyn GraphicsDevice,
        color: &Arc<dyn Texture>,
        depth: Option<&DepthAttachment>,
    ) {
        let results = [
            device.destroy_texture(color),
            match depth {
                Some(DepthAttachment::Renderbuffer(rb)) => device.destroy_renderbuffer(rb),
                Some(DepthAttachment::Texture(tex)) => device.destroy_texture(tex),
                None => Ok(()),
            },
        ];
        for err in results.into_iter().filter_map(|r| r.err()) {
            crate::engine_warn!("riptide::RenderTarget", "rollback release failed: {}", err);
        }
    }

    /// Release every GPU resource of this target.
    ///
    /// All three resources are released even if one fails; the first error
    /// is returned and the target counts as destroyed either way.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the target was already destroyed, otherwise the
    /// first release failure.
    pub fn destroy(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        let attachments = self.attachments.take().ok_or_else(|| self.destroyed_error())?;

        let released = [
            ("framebuffer", device.destroy_framebuffer(&attachments.framebuffer)),
            ("color", device.destroy_texture(&attachments.color)),
            ("depth", match &attachments.depth {
                DepthAttachment::Renderbuffer(rb) => device.destroy_renderbuffer(rb),
                DepthAttachment::Texture(tex) => device.destroy_texture(tex),
            }),
        ];

        let mut first_error = None;
        for (attachment, result) in released {
            if let Err(err) = result {
                crate::engine_error!("riptide::RenderTarget",
                    "RenderTarget '{}': failed to release {}: {}", self.name, attachment, err);
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                crate::engine_debug!("riptide::RenderTarget", "RenderTarget '{}' destroyed", self.name);
                Ok(())
            }
        }
    }

    fn destroyed_error(&self) -> Error {
        Error::InvalidResource(format!("RenderTarget '{}' was destroyed", self.name))
    }

    fn live(&self) -> Result<&Attachments> {
        self.attachments.as_ref().ok_or_else(|| self.destroyed_error())
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth_mode(&self) -> DepthMode {
        self.depth_mode
    }

    /// False once `destroy` has run
    pub fn is_alive(&self) -> bool {
        self.attachments.is_some()
    }

    pub fn framebuffer(&self) -> Result<&Arc<dyn Framebuffer>> {
        Ok(&self.live()?.framebuffer)
    }

    /// Color attachment, sampled by the surface shader
    pub fn color_texture(&self) -> Result<&Arc<dyn Texture>> {
        Ok(&self.live()?.color)
    }

    /// Depth texture, or `Ok(None)` for renderbuffer depth
    pub fn depth_texture(&self) -> Result<Option<&Arc<dyn Texture>>> {
        Ok(self.live()?.depth.texture())
    }
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
