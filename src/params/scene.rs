//! Scene composition: props, player marker and the moving light.

use super::{CameraParams, TerrainParams, WaterParams};

/// Pillar-with-sphere props placed on the terrain
#[derive(Debug, Clone)]
pub struct PropLayout {
    /// Pillar base positions in the xz-plane
    pub pillar_positions: Vec<[f32; 2]>,

    /// Pillar bottom radius (world units)
    pub pillar_bottom_radius: f32,

    /// Pillar top radius (world units)
    pub pillar_top_radius: f32,

    /// Pillar height (world units)
    pub pillar_height: f32,

    /// Radius of the sphere resting on each pillar
    pub sphere_radius: f32,

    /// Tessellation (slices and stacks) for cylinders and spheres
    pub tessellation: u32,

    /// Pillar colour (RGB)
    pub pillar_color: [f32; 3],

    /// Sphere colour (RGB)
    pub sphere_color: [f32; 3],
}

impl Default for PropLayout {
    fn default() -> Self {
        Self {
            pillar_positions: vec![[6.0, -4.0], [-8.0, -6.0], [3.0, 9.0]],
            pillar_bottom_radius: 0.5,
            pillar_top_radius: 0.3,
            pillar_height: 3.0,
            sphere_radius: 0.5,
            tessellation: 20,
            pillar_color: [0.5, 0.5, 1.0],
            sphere_color: [1.0, 0.5, 0.5],
        }
    }
}

/// Player marker parameters
#[derive(Debug, Clone)]
pub struct PlayerParams {
    /// Starting position (world units)
    pub start: [f32; 3],

    /// Marker sphere radius (world units)
    pub radius: f32,

    /// Translation speed (world units per second)
    pub max_speed: f32,

    /// Marker colour (RGB)
    pub color: [f32; 3],
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            start: [0.0, 0.5, 0.0],
            radius: 0.5,
            max_speed: 2.5,
            color: [0.0, 0.0, 0.0],
        }
    }
}

/// Circular path followed by the moving point light
#[derive(Debug, Clone)]
pub struct LightOrbit {
    /// Orbit radius around the origin (world units)
    pub radius: f32,

    /// Height above y = 0 (world units)
    pub height: f32,

    /// Angular speed (radians per second)
    pub angular_speed: f32,

    /// Marker sphere radius (world units)
    pub marker_radius: f32,
}

impl Default for LightOrbit {
    fn default() -> Self {
        Self {
            radius: 12.0,
            height: 3.0,
            angular_speed: 0.5,
            marker_radius: 0.25,
        }
    }
}

/// Everything needed to build a [`crate::scene::Scene`]
#[derive(Debug, Clone, Default)]
pub struct SceneParams {
    pub terrain: TerrainParams,
    pub water: WaterParams,
    pub props: PropLayout,
    pub player: PlayerParams,
    pub light_orbit: LightOrbit,
    pub camera: CameraParams,
}
