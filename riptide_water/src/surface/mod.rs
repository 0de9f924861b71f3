mod grid;
mod material;
mod uniforms;

pub use grid::{WaterGrid, WaterVertex};
pub use material::{
    SurfaceMaterial, GridSurfaceMaterial,
    REFLECTION_SAMPLER, REFRACTION_SAMPLER, DEPTH_SAMPLER,
};
pub use uniforms::{SurfaceBlend, WaterUniforms};
