//! Terrain mesh: a flat grid displaced by the noise height field.

use log::debug;

use crate::mesh::{create_grid, MeshData, MeshResult};
use crate::noise::NoiseField;
use crate::params::TerrainParams;

/// Fixed vertical offset that keeps the terrain below the rest of the scene
pub const TERRAIN_BASELINE: f32 = -2.0;

/// Builds terrain meshes and answers height queries for a given seed
#[derive(Debug, Clone, Copy)]
pub struct TerrainBuilder {
    noise: NoiseField,
    baseline: f32,
}

impl TerrainBuilder {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: NoiseField::new(seed),
            baseline: TERRAIN_BASELINE,
        }
    }

    /// Same seed, different vertical offset
    pub fn with_baseline(mut self, baseline: f32) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Terrain surface height at world position `(x, z)`
    ///
    /// Matches the `y` that [`TerrainBuilder::displace`] writes for a vertex
    /// at the same position; used to rest props on the ground.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.baseline + self.noise.height(x, z)
    }

    /// Overwrite every vertex height from its own x/z position
    pub fn displace(&self, mesh: &mut MeshData) {
        for vertex in &mut mesh.vertices {
            vertex.position[1] = self.height_at(vertex.position[0], vertex.position[2]);
        }
    }

    /// Flat grid, then one height lookup per vertex
    pub fn build_mesh(
        &self,
        width: f32,
        depth: f32,
        rows: usize,
        cols: usize,
    ) -> MeshResult<MeshData> {
        let mut mesh = create_grid(width, depth, rows, cols)?;
        self.displace(&mut mesh);

        debug!(
            "Terrain seed={} {}x{}: {} vertices, {} indices",
            self.noise.seed(),
            rows,
            cols,
            mesh.vertices.len(),
            mesh.indices.len()
        );

        Ok(mesh)
    }

    /// Build a terrain mesh with the default baseline
    pub fn build(
        width: f32,
        depth: f32,
        rows: usize,
        cols: usize,
        seed: u32,
    ) -> MeshResult<MeshData> {
        Self::new(seed).build_mesh(width, depth, rows, cols)
    }

    /// Build a terrain mesh from [`TerrainParams`]
    pub fn from_params(params: &TerrainParams) -> MeshResult<MeshData> {
        Self::build(
            params.width,
            params.depth,
            params.rows,
            params.cols,
            params.seed,
        )
    }
}
