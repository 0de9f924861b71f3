/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Counts live resources, records every command, snapshots the bound state
/// at each draw call and can inject allocation, draw or per-command failures.

use std::sync::Arc;
use glam::{Vec3, Vec4};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, Key, KeyData, SlotMap};

use crate::camera::RenderView;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, ResourceId,
    Texture, TextureDesc, TextureInfo, Renderbuffer, RenderbufferDesc, TextureFormat,
    Framebuffer, FramebufferDesc, Viewport, ClearFlags, ClearValue,
};

new_key_type! {
    /// Key of a live mock resource
    pub struct MockResourceKey;
}

/// Kind of a live mock resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockResourceKind {
    Texture,
    Renderbuffer,
    Framebuffer,
}

fn resource_id(key: MockResourceKey) -> ResourceId {
    ResourceId(key.data().as_ffi())
}

fn resource_key(id: ResourceId) -> MockResourceKey {
    MockResourceKey::from(KeyData::from_ffi(id.0))
}

// ============================================================================
// Mock resources
// ============================================================================

pub struct MockTexture {
    id: ResourceId,
    label: String,
    info: TextureInfo,
}

impl Texture for MockTexture {
    fn id(&self) -> ResourceId { self.id }
    fn label(&self) -> &str { &self.label }
    fn info(&self) -> &TextureInfo { &self.info }
}

pub struct MockRenderbuffer {
    id: ResourceId,
    label: String,
    width: u32,
    height: u32,
    format: TextureFormat,
}

impl Renderbuffer for MockRenderbuffer {
    fn id(&self) -> ResourceId { self.id }
    fn label(&self) -> &str { &self.label }
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }
    fn format(&self) -> TextureFormat { self.format }
}

pub struct MockFramebuffer {
    id: ResourceId,
    label: String,
    width: u32,
    height: u32,
}

impl Framebuffer for MockFramebuffer {
    fn id(&self) -> ResourceId { self.id }
    fn label(&self) -> &str { &self.label }
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }
}

// ============================================================================
// Draw record
// ============================================================================

/// Device state captured at a draw call
#[derive(Debug, Clone)]
pub struct DrawRecord {
    /// Label of the bound framebuffer, `None` for the default framebuffer
    pub framebuffer: Option<String>,
    pub viewport: Viewport,
    pub clip_plane: Option<Vec4>,
    pub eye: Option<Vec3>,
    /// Sampler slot → texture label
    pub textures: FxHashMap<u32, String>,
    pub index_count: u32,
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

pub struct MockGraphicsDevice {
    resources: SlotMap<MockResourceKey, MockResourceKind>,
    /// Every command, in submission order
    pub commands: Vec<String>,
    /// State snapshot of every draw call
    pub draws: Vec<DrawRecord>,
    /// Number of successful allocations left before `ResourceExhaustion`
    pub allocation_budget: Option<usize>,
    /// Fail every draw call with `DrawFailed`
    pub fail_draws: bool,
    /// Fail with `BackendError` every command starting with one of these
    /// prefixes (`"set_viewport 320x180"`, `"destroy_framebuffer"`, ...).
    /// A rejected command changes no state.
    pub fail_commands: Vec<String>,
    bound_framebuffer: Option<String>,
    viewport: Viewport,
    clip_plane: Option<Vec4>,
    view: Option<RenderView>,
    textures: FxHashMap<u32, String>,
    uniforms: Vec<u8>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            resources: SlotMap::with_key(),
            commands: Vec::new(),
            draws: Vec::new(),
            allocation_budget: None,
            fail_draws: false,
            fail_commands: Vec::new(),
            bound_framebuffer: None,
            viewport: Viewport::from_size(800, 600),
            clip_plane: None,
            view: None,
            textures: FxHashMap::default(),
            uniforms: Vec::new(),
        }
    }

    /// Device that fails every allocation after `budget` successful ones
    pub fn with_allocation_budget(budget: usize) -> Self {
        let mut device = Self::new();
        device.allocation_budget = Some(budget);
        device
    }

    /// Number of resources created and not yet destroyed
    pub fn live_resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Number of live resources of one kind
    pub fn live_count(&self, kind: MockResourceKind) -> usize {
        self.resources.values().filter(|k| **k == kind).count()
    }

    /// Label of the bound framebuffer (`None` = default framebuffer)
    pub fn bound_framebuffer(&self) -> Option<&str> {
        self.bound_framebuffer.as_deref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clip_plane(&self) -> Option<Vec4> {
        self.clip_plane
    }

    /// Last uniform block pushed
    pub fn uniforms(&self) -> &[u8] {
        &self.uniforms
    }

    /// Commands whose name starts with `prefix`
    pub fn commands_matching(&self, prefix: &str) -> Vec<&str> {
        self.commands.iter()
            .map(|c| c.as_str())
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    /// Slot → label of every bound texture
    pub fn bound_textures(&self) -> &FxHashMap<u32, String> {
        &self.textures
    }

    /// Rejects `command` if it matches an injected failure
    fn check(&self, command: &str) -> Result<()> {
        if self.fail_commands.iter().any(|prefix| command.starts_with(prefix.as_str())) {
            return Err(Error::BackendError(format!("mock device rejected '{}'", command)));
        }
        Ok(())
    }

    fn allocate(&mut self, kind: MockResourceKind, label: &str) -> Result<ResourceId> {
        if let Some(budget) = self.allocation_budget.as_mut() {
            if *budget == 0 {
                return Err(Error::ResourceExhaustion(
                    format!("mock device out of memory allocating '{}'", label)));
            }
            *budget -= 1;
        }
        Ok(resource_id(self.resources.insert(kind)))
    }

    fn release(&mut self, id: ResourceId, kind: MockResourceKind, label: &str) -> Result<()> {
        match self.resources.get(resource_key(id)) {
            Some(live) if *live == kind => {
                self.resources.remove(resource_key(id));
                Ok(())
            }
            _ => Err(Error::InvalidResource(
                format!("{:?} '{}' is not alive", kind, label))),
        }
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Arc<dyn Texture>> {
        let command = format!("create_texture {} {}x{}", desc.label, desc.width, desc.height);
        self.check(&command)?;
        let id = self.allocate(MockResourceKind::Texture, &desc.label)?;
        self.commands.push(command);
        Ok(Arc::new(MockTexture {
            id,
            label: desc.label.clone(),
            info: TextureInfo::from(desc),
        }))
    }

    fn create_renderbuffer(&mut self, desc: &RenderbufferDesc) -> Result<Arc<dyn Renderbuffer>> {
        let command = format!("create_renderbuffer {} {}x{}", desc.label, desc.width, desc.height);
        self.check(&command)?;
        let id = self.allocate(MockResourceKind::Renderbuffer, &desc.label)?;
        self.commands.push(command);
        Ok(Arc::new(MockRenderbuffer {
            id,
            label: desc.label.clone(),
            width: desc.width,
            height: desc.height,
            format: desc.format,
        }))
    }

    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        let (width, height) = desc.validate()?;
        let command = format!("create_framebuffer {} {}x{}", desc.label, width, height);
        self.check(&command)?;
        let id = self.allocate(MockResourceKind::Framebuffer, desc.label)?;
        self.commands.push(command);
        Ok(Arc::new(MockFramebuffer {
            id,
            label: desc.label.to_string(),
            width,
            height,
        }))
    }

    fn destroy_texture(&mut self, texture: &Arc<dyn Texture>) -> Result<()> {
        let command = format!("destroy_texture {}", texture.label());
        self.check(&command)?;
        self.release(texture.id(), MockResourceKind::Texture, texture.label())?;
        self.commands.push(command);
        Ok(())
    }

    fn destroy_renderbuffer(&mut self, renderbuffer: &Arc<dyn Renderbuffer>) -> Result<()> {
        let command = format!("destroy_renderbuffer {}", renderbuffer.label());
        self.check(&command)?;
        self.release(renderbuffer.id(), MockResourceKind::Renderbuffer, renderbuffer.label())?;
        self.commands.push(command);
        Ok(())
    }

    fn destroy_framebuffer(&mut self, framebuffer: &Arc<dyn Framebuffer>) -> Result<()> {
        let command = format!("destroy_framebuffer {}", framebuffer.label());
        self.check(&command)?;
        self.release(framebuffer.id(), MockResourceKind::Framebuffer, framebuffer.label())?;
        self.commands.push(command);
        Ok(())
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<&Arc<dyn Framebuffer>>) -> Result<()> {
        match framebuffer {
            Some(fb) => {
                let command = format!("bind_framebuffer {}", fb.label());
                self.check(&command)?;
                if !self.resources.contains_key(resource_key(fb.id())) {
                    return Err(Error::InvalidResource(
                        format!("framebuffer '{}' is not alive", fb.label())));
                }
                self.bound_framebuffer = Some(fb.label().to_string());
                self.commands.push(command);
            }
            None => {
                let command = "bind_framebuffer default".to_string();
                self.check(&command)?;
                self.bound_framebuffer = None;
                self.commands.push(command);
            }
        }
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        let command = format!("set_viewport {}x{}", viewport.width, viewport.height);
        self.check(&command)?;
        self.viewport = viewport;
        self.commands.push(command);
        Ok(())
    }

    fn clear(&mut self, flags: ClearFlags, _value: ClearValue) -> Result<()> {
        let command = format!("clear {:?}", flags);
        self.check(&command)?;
        self.commands.push(command);
        Ok(())
    }

    fn enable_clip_plane(&mut self, equation: Vec4) -> Result<()> {
        let command = format!("enable_clip_plane {:?}", equation.to_array());
        self.check(&command)?;
        self.clip_plane = Some(equation);
        self.commands.push(command);
        Ok(())
    }

    fn disable_clip_plane(&mut self) -> Result<()> {
        let command = "disable_clip_plane".to_string();
        self.check(&command)?;
        self.clip_plane = None;
        self.commands.push(command);
        Ok(())
    }

    fn set_view(&mut self, view: &RenderView) -> Result<()> {
        let command = "set_view".to_string();
        self.check(&command)?;
        self.view = Some(*view);
        self.commands.push(command);
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: Option<&Arc<dyn Texture>>) -> Result<()> {
        match texture {
            Some(tex) => {
                let command = format!("bind_texture {} {}", slot, tex.label());
                self.check(&command)?;
                self.textures.insert(slot, tex.label().to_string());
                self.commands.push(command);
            }
            None => {
                let command = format!("bind_texture {} none", slot);
                self.check(&command)?;
                self.textures.remove(&slot);
                self.commands.push(command);
            }
        }
        Ok(())
    }

    fn push_constants(&mut self, data: &[u8]) -> Result<()> {
        let command = format!("push_constants {}", data.len());
        self.check(&command)?;
        self.uniforms = data.to_vec();
        self.commands.push(command);
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32, _first_index: u32) -> Result<()> {
        if self.fail_draws {
            return Err(Error::DrawFailed("mock device draw failure".to_string()));
        }
        let command = format!("draw_indexed {}", index_count);
        self.check(&command)?;
        self.commands.push(command);
        self.draws.push(DrawRecord {
            framebuffer: self.bound_framebuffer.clone(),
            viewport: self.viewport,
            clip_plane: self.clip_plane,
            eye: self.view.map(|v| v.eye()),
            textures: self.textures.clone(),
            index_count,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
