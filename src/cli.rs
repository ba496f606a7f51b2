//! Command-line argument parsing.

use clap::Parser;
use log::info;

use crate::params::{seed_from_clock, DrawMode, RenderConfig, SceneParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavefield")]
#[command(about = "Procedural terrain and wave-animated water viewer", long_about = None)]
pub struct Args {
    /// Terrain noise seed (defaults to wall-clock time)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u32>,

    /// Terrain width and depth (world units)
    #[arg(long, value_name = "UNITS", default_value = "100")]
    pub terrain_size: f32,

    /// Terrain vertex rows and columns
    #[arg(long, value_name = "VERTICES", default_value = "100")]
    pub terrain_resolution: usize,

    /// Draw triangle edges instead of filled triangles
    #[arg(long)]
    pub wireframe: bool,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "800")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "600")]
    pub height: u32,
}

impl Args {
    /// Scene parameters with the terrain overrides applied
    pub fn scene_params(&self) -> SceneParams {
        let mut params = SceneParams::default();
        params.terrain.seed = self.seed.unwrap_or_else(seed_from_clock);
        params.terrain.width = self.terrain_size;
        params.terrain.depth = self.terrain_size;
        params.terrain.rows = self.terrain_resolution;
        params.terrain.cols = self.terrain_resolution;
        info!(
            "Terrain: seed {} ({}), {}x{} units, {}x{} vertices",
            params.terrain.seed,
            if self.seed.is_some() { "given" } else { "clock" },
            self.terrain_size,
            self.terrain_size,
            self.terrain_resolution,
            self.terrain_resolution
        );
        params
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            draw_mode: if self.wireframe {
                DrawMode::Lines
            } else {
                DrawMode::Triangles
            },
            ..RenderConfig::default()
        }
    }
}
