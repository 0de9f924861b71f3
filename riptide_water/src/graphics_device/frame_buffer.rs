/// Framebuffer trait - groups a color attachment and a depth attachment
///
/// Created once per off-screen target and reused every frame. Never resized:
/// a different resolution means destroying and creating a new framebuffer.

use std::sync::Arc;
use crate::error::{Error, Result};
use super::{ResourceId, Texture, Renderbuffer, TextureUsage};

/// Depth storage of an off-screen target
#[derive(Clone)]
pub enum DepthAttachment {
    /// Depth renderbuffer, never sampled
    Renderbuffer(Arc<dyn Renderbuffer>),
    /// Depth texture, sampled by the surface shader
    Texture(Arc<dyn Texture>),
}

impl DepthAttachment {
    pub fn width(&self) -> u32 {
        match self {
            DepthAttachment::Renderbuffer(rb) => rb.width(),
            DepthAttachment::Texture(tex) => tex.info().width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            DepthAttachment::Renderbuffer(rb) => rb.height(),
            DepthAttachment::Texture(tex) => tex.info().height,
        }
    }

    /// The depth texture, if this attachment can be sampled
    pub fn texture(&self) -> Option<&Arc<dyn Texture>> {
        match self {
            DepthAttachment::Texture(tex) => Some(tex),
            DepthAttachment::Renderbuffer(_) => None,
        }
    }
}

/// Framebuffer - a bindable render destination
pub trait Framebuffer: Send + Sync {
    /// Backend object name
    fn id(&self) -> ResourceId;

    /// Debug label given at creation
    fn label(&self) -> &str;

    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;
}

/// Descriptor for creating a framebuffer
pub struct FramebufferDesc<'a> {
    pub label: &'a str,
    /// Color attachment (must be RENDER_TARGET)
    pub color_attachment: &'a Arc<dyn Texture>,
    /// Optional depth attachment
    pub depth_attachment: Option<&'a DepthAttachment>,
}

impl FramebufferDesc<'_> {
    /// Attachment dimensions, checked for consistency
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if the color attachment is not renderable or the
    /// depth attachment does not share the color attachment's size.
    pub fn validate(&self) -> Result<(u32, u32)> {
        let color = self.color_attachment.info();
        if !color.usage.contains(TextureUsage::RENDER_TARGET) {
            return Err(Error::ConfigurationError(format!(
                "framebuffer '{}': color attachment '{}' is not a render target",
                self.label, self.color_attachment.label())));
        }

        if let Some(depth) = self.depth_attachment {
            if depth.width() != color.width || depth.height() != color.height {
                return Err(Error::ConfigurationError(format!(
                    "framebuffer '{}': depth attachment is {}x{}, color attachment is {}x{}",
                    self.label, depth.width(), depth.height(), color.width, color.height)));
            }
        }

        Ok((color.width, color.height))
    }
}
