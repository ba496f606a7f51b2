//! Rendering configuration.

/// How a mesh's indices are assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Filled triangles
    #[default]
    Triangles,

    /// Triangle edges as a line list
    Lines,
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Primitive assembly for terrain, water and props
    pub draw_mode: DrawMode,

    /// Background colour (RGB)
    pub clear_color: [f64; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            near_plane: 0.1,
            far_plane: 100.0,
            draw_mode: DrawMode::Triangles,
            clear_color: [0.2, 0.2, 0.2],
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
