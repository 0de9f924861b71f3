mod water_compositor;

pub use water_compositor::{WaterCompositor, CompositorState, FrameOutcome};
