//! Fly camera configuration.

/// Fly camera parameters (keyboard translation, mouse look)
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Initial eye position (world units)
    pub position: [f32; 3],

    /// Initial yaw (degrees, -90 looks down -z)
    pub yaw_degrees: f32,

    /// Initial pitch (degrees)
    pub pitch_degrees: f32,

    /// Translation speed (world units per second)
    pub speed: f32,

    /// Mouse look sensitivity (degrees per pixel)
    pub sensitivity: f32,

    /// Initial vertical field of view (degrees), also the zoom upper bound
    pub zoom_degrees: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            yaw_degrees: -90.0,
            pitch_degrees: 0.0,
            speed: 2.5,
            sensitivity: 0.1,
            zoom_degrees: 45.0,
        }
    }
}
