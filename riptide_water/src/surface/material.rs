/// Surface material: the shader side of the water plane.
///
/// The compositor tells the material which sampler slot carries each image
/// once at setup, then calls `draw` every frame with the bound textures and
/// a fresh uniform block.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::GraphicsDevice;
use super::{WaterGrid, WaterUniforms};

/// Sampler of the reflection color image
pub const REFLECTION_SAMPLER: &str = "reflection_texture";
/// Sampler of the refraction color image
pub const REFRACTION_SAMPLER: &str = "refraction_texture";
/// Sampler of the refraction depth image
pub const DEPTH_SAMPLER: &str = "depth_map";

pub trait SurfaceMaterial {
    /// Associate a sampler name of the surface shader with a texture slot
    fn set_sampler_slot(&mut self, name: &str, slot: u32) -> Result<()>;

    /// Slot previously assigned to `name`
    fn sampler_slot(&self, name: &str) -> Option<u32>;

    /// Upload `uniforms` and draw the surface primitive into the bound
    /// framebuffer
    fn draw(&self, device: &mut dyn GraphicsDevice, uniforms: &WaterUniforms) -> Result<()>;
}

/// Material drawing a `WaterGrid` whose geometry the backend already holds
pub struct GridSurfaceMaterial {
    grid: WaterGrid,
    sampler_slots: FxHashMap<String, u32>,
}

impl GridSurfaceMaterial {
    pub fn new(grid: WaterGrid) -> Self {
        Self {
            grid,
            sampler_slots: FxHashMap::default(),
        }
    }

    pub fn grid(&self) -> &WaterGrid {
        &self.grid
    }
}

impl SurfaceMaterial for GridSurfaceMaterial {
    fn set_sampler_slot(&mut self, name: &str, slot: u32) -> Result<()> {
        if let Some((other, _)) = self.sampler_slots.iter()
            .find(|(other, s)| **s == slot && other.as_str() != name)
        {
            engine_bail!(ConfigurationError, "riptide::GridSurfaceMaterial",
                "sampler slot {} already used by '{}'", slot, other);
        }
        self.sampler_slots.insert(name.to_string(), slot);
        Ok(())
    }

    fn sampler_slot(&self, name: &str) -> Option<u32> {
        self.sampler_slots.get(name).copied()
    }

    fn draw(&self, device: &mut dyn GraphicsDevice, uniforms: &WaterUniforms) -> Result<()> {
        device.push_constants(uniforms.as_bytes())?;
        device.draw_indexed(self.grid.index_count(), 0)
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
