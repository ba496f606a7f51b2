//! Terrain generation parameters.

use std::time::{SystemTime, UNIX_EPOCH};

/// Procedural terrain parameters
#[derive(Debug, Clone)]
pub struct TerrainParams {
    /// Extent along x (world units)
    pub width: f32,

    /// Extent along z (world units)
    pub depth: f32,

    /// Vertex rows along z (must be >= 2)
    pub rows: usize,

    /// Vertex columns along x (must be >= 2)
    pub cols: usize,

    /// Lattice noise seed
    pub seed: u32,

    /// Surface colour (RGB)
    pub color: [f32; 3],
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 100.0,
            rows: 100,
            cols: 100,
            seed: seed_from_clock(),
            color: [0.0, 0.8, 0.0],
        }
    }
}

/// Seed derived from wall-clock time, used when no seed is given
pub fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32 ^ d.subsec_nanos())
        .unwrap_or(0)
}
