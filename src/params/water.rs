//! Water surface and wave parameters.

/// Water grid and Gerstner-like wave parameters
#[derive(Debug, Clone)]
pub struct WaterParams {
    /// Extent along x (world units)
    pub width: f32,

    /// Extent along z (world units)
    pub depth: f32,

    /// Vertex rows along z
    pub rows: usize,

    /// Vertex columns along x
    pub cols: usize,

    /// Distance between wave crests (world units)
    pub wavelength: f32,

    /// Crest sharpness; 1.0 gives amplitude 1/k
    pub peak: f32,

    /// Propagation direction in the xz-plane (normalized on use)
    pub direction: [f32; 2],

    /// Surface colour (RGBA, alpha used for blending)
    pub color: [f32; 4],
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            width: 50.0,
            depth: 50.0,
            rows: 300,
            cols: 200,
            wavelength: 4.0,
            peak: 1.0,
            direction: [1.0, 0.0],
            color: [0.0, 0.0, 0.8, 0.2],
        }
    }
}
