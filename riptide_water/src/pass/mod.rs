mod clip_plane;
mod scene;
mod clipped_scene_pass;

pub use clip_plane::{ClipPlane, MIN_NORMAL_LENGTH};
pub use scene::{Scene, EmptyScene};
pub use clipped_scene_pass::ClippedScenePass;
