/// Texture and renderbuffer traits, descriptors and info

use bitflags::bitflags;
use super::ResourceId;

/// Pixel format of a texture or renderbuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_UNORM,
    D24_UNORM,
    D32_FLOAT,
}

impl TextureFormat {
    /// Returns true for depth formats
    pub fn is_depth(self) -> bool {
        matches!(self, TextureFormat::D24_UNORM | TextureFormat::D32_FLOAT)
    }
}

bitflags! {
    /// Texture usage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TextureUsage: u32 {
        /// Can be bound to a sampler slot
        const SAMPLED = 1 << 0;
        /// Can be a framebuffer color attachment
        const RENDER_TARGET = 1 << 1;
        /// Can be a framebuffer depth attachment
        const DEPTH_STENCIL = 1 << 2;
    }
}

/// Sampler filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Sampler addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

/// Sampling state baked into a texture at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerDesc {
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
}

impl SamplerDesc {
    /// Linear filtering, clamped addressing: what every captured pass uses
    pub const LINEAR_CLAMP: SamplerDesc = SamplerDesc {
        min_filter: FilterMode::Linear,
        mag_filter: FilterMode::Linear,
        wrap_s: WrapMode::ClampToEdge,
        wrap_t: WrapMode::ClampToEdge,
    };
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Debug label
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Sampling state
    pub sampler: SamplerDesc,
}

/// Read-only properties of a created texture
#[derive(Debug, Clone)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
    pub sampler: SamplerDesc,
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            usage: desc.usage,
            sampler: desc.sampler,
        }
    }
}

/// Texture resource trait
///
/// Implemented by backend-specific texture types. GPU memory is released
/// by `GraphicsDevice::destroy_texture`, not on drop.
pub trait Texture: Send + Sync {
    /// Backend object name
    fn id(&self) -> ResourceId;

    /// Debug label given at creation
    fn label(&self) -> &str;

    /// Read-only properties of this texture
    fn info(&self) -> &TextureInfo;
}

/// Descriptor for creating a depth renderbuffer (never sampled)
#[derive(Debug, Clone)]
pub struct RenderbufferDesc {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Renderbuffer resource trait
pub trait Renderbuffer: Send + Sync {
    fn id(&self) -> ResourceId;
    fn label(&self) -> &str;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn format(&self) -> TextureFormat;
}
