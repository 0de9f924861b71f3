/// Flat water mesh centered on the origin in the XZ plane.
///
/// Every cell is an independent quad (4 vertices, 6 indices) so the shader
/// can distort cells without sharing edges. The mesh lies at y = 0; the
/// water height is applied by the surface shader.

use bytemuck::{Pod, Zeroable};
use crate::error::Result;
use crate::engine_bail;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct WaterVertex {
    pub position: [f32; 3],
    /// Grid-wide texture coordinate in [0, 1]
    pub uv: [f32; 2],
}

pub struct WaterGrid {
    cells: u32,
    cell_size: f32,
    vertices: Vec<WaterVertex>,
    indices: Vec<u32>,
}

impl WaterGrid {
    /// Generate a `cells` x `cells` grid of square cells.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if `cells` is zero or `cell_size` is not a
    /// positive finite number.
    pub fn generate(cells: u32, cell_size: f32) -> Result<Self> {
        if cells == 0 {
            engine_bail!(ConfigurationError, "riptide::WaterGrid",
                "water grid needs at least one cell");
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            engine_bail!(ConfigurationError, "riptide::WaterGrid",
                "invalid water grid cell size {}", cell_size);
        }

        let quad_count = (cells as usize) * (cells as usize);
        let mut vertices = Vec::with_capacity(quad_count * 4);
        let mut indices = Vec::with_capacity(quad_count * 6);
        let half = cells as f32 * cell_size * 0.5;
        let inv = 1.0 / cells as f32;

        for row in 0..cells {
            for col in 0..cells {
                let x0 = col as f32 * cell_size - half;
                let z0 = row as f32 * cell_size - half;
                let (x1, z1) = (x0 + cell_size, z0 + cell_size);
                let (u0, v0) = (col as f32 * inv, row as f32 * inv);
                let (u1, v1) = (u0 + inv, v0 + inv);

                let base = vertices.len() as u32;
                vertices.push(WaterVertex { position: [x0, 0.0, z0], uv: [u0, v0] });
                vertices.push(WaterVertex { position: [x0, 0.0, z1], uv: [u0, v1] });
                vertices.push(WaterVertex { position: [x1, 0.0, z0], uv: [u1, v0] });
                vertices.push(WaterVertex { position: [x1, 0.0, z1], uv: [u1, v1] });

                // Counter-clockwise seen from above
                indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
            }
        }

        Ok(Self { cells, cell_size, vertices, indices })
    }

    pub fn cells(&self) -> u32 {
        self.cells
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Side length of the whole grid
    pub fn extent(&self) -> f32 {
        self.cells as f32 * self.cell_size
    }

    pub fn vertices(&self) -> &[WaterVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Vertex data for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
