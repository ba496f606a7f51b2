//! Free-flying camera driven by keyboard translation and mouse look.

use glam::{Mat4, Vec3};

use crate::params::{CameraParams, RenderConfig};

/// Pitch limit that keeps the view away from the poles (degrees)
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Smallest field of view reachable by zooming (degrees)
pub const MIN_ZOOM_DEGREES: f32 = 1.0;

/// Translation directions relative to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Euler-angle fly camera
#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Vec3,
    yaw_degrees: f32,
    pitch_degrees: f32,
    speed: f32,
    sensitivity: f32,
    zoom_degrees: f32,
    max_zoom_degrees: f32,
}

impl FlyCamera {
    pub fn new(params: &CameraParams) -> Self {
        Self {
            position: Vec3::from_array(params.position),
            yaw_degrees: params.yaw_degrees,
            pitch_degrees: params
                .pitch_degrees
                .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES),
            speed: params.speed,
            sensitivity: params.sensitivity,
            zoom_degrees: params.zoom_degrees,
            max_zoom_degrees: params.zoom_degrees,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current vertical field of view (degrees)
    pub fn zoom_degrees(&self) -> f32 {
        self.zoom_degrees
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw_degrees.to_radians(), self.pitch_degrees.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// Unit vector to the right of the view, always horizontal
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    /// Translate for `dt` seconds in the given direction
    pub fn process_keyboard(&mut self, movement: Movement, dt: f32) {
        let step = self.speed * dt;
        let offset = match movement {
            Movement::Forward => self.front() * step,
            Movement::Backward => -self.front() * step,
            Movement::Left => -self.right() * step,
            Movement::Right => self.right() * step,
        };
        self.position += offset;
    }

    /// Rotate from a mouse delta in pixels (positive dy looks down)
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw_degrees += dx * self.sensitivity;
        self.pitch_degrees = (self.pitch_degrees - dy * self.sensitivity)
            .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    /// Zoom in for positive scroll, out for negative
    pub fn process_scroll(&mut self, delta: f32) {
        self.zoom_degrees =
            (self.zoom_degrees - delta).clamp(MIN_ZOOM_DEGREES, self.max_zoom_degrees);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), Vec3::Y)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let proj = Mat4::perspective_rh(
            self.zoom_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        (proj * self.view_matrix(), self.position)
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(&CameraParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_looks_down_negative_z() {
        let camera = FlyCamera::default();
        let front = camera.front();
        assert!((front - Vec3::NEG_Z).length() < 1e-6);
        assert!((camera.right() - Vec3::X).length() < 1e-6);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_keyboard_moves_along_view() {
        let mut camera = FlyCamera::default();
        camera.process_keyboard(Movement::Forward, 1.0);
        assert!((camera.position() - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);

        camera.process_keyboard(Movement::Right, 2.0);
        assert!((camera.position() - Vec3::new(5.0, 0.0, 0.5)).length() < 1e-5);

        camera.process_keyboard(Movement::Left, 2.0);
        camera.process_keyboard(Movement::Backward, 1.0);
        assert!((camera.position() - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::default();
        camera.process_mouse(0.0, -10_000.0);
        assert_eq!(camera.pitch_degrees(), PITCH_LIMIT_DEGREES);
        camera.process_mouse(0.0, 10_000.0);
        assert_eq!(camera.pitch_degrees(), -PITCH_LIMIT_DEGREES);

        // Right vector stays well defined at the limit
        assert!(camera.right().is_finite());
    }

    #[test]
    fn test_mouse_yaw_turns_right() {
        let mut camera = FlyCamera::default();
        camera.process_mouse(900.0, 0.0);
        assert!((camera.front() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_zoom_bounds() {
        let mut camera = FlyCamera::default();
        camera.process_scroll(100.0);
        assert_eq!(camera.zoom_degrees(), MIN_ZOOM_DEGREES);
        camera.process_scroll(-100.0);
        assert_eq!(camera.zoom_degrees(), 45.0);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = FlyCamera::default();
        let render_config = RenderConfig::default();

        let (view_proj, eye_pos) = camera.create_view_proj_matrix(&render_config);

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert_eq!(eye_pos, camera.position());

        // A point straight ahead projects to the centre of the screen
        let clip = view_proj * Vec3::new(0.0, 0.0, -5.0).extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }
}
