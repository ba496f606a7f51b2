//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (world units, seconds, degrees)
//! - Documented ranges and meanings
//! - Type safety where possible

mod camera;
mod render;
mod scene;
mod terrain;
mod water;

// Re-export all types
pub use camera::CameraParams;
pub use render::{DrawMode, RenderConfig};
pub use scene::{LightOrbit, PlayerParams, PropLayout, SceneParams};
pub use terrain::{seed_from_clock, TerrainParams};
pub use water::WaterParams;
