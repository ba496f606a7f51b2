//! Water surface: a flat grid animated in the vertex shader by a
//! Gerstner-like travelling wave.
//!
//! [`GerstnerWave::displace`] is the CPU reference of `water.wgsl`; keep the
//! two in sync.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::mesh::{create_grid, MeshData, MeshResult};
use crate::params::WaterParams;

/// Gravitational acceleration used for the deep-water phase speed (m/s^2)
pub const GRAVITY: f32 = 9.81;

/// Single travelling wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GerstnerWave {
    /// Crest-to-crest distance (world units)
    pub wavelength: f32,

    /// Crest sharpness; amplitude is `exp(k * (peak - 1)) / k`
    pub peak: f32,

    /// Unit propagation direction in the xz-plane
    pub direction: Vec2,
}

impl GerstnerWave {
    pub fn new(wavelength: f32, peak: f32, direction: Vec2) -> Self {
        Self {
            wavelength,
            peak,
            direction: direction.try_normalize().unwrap_or(Vec2::X),
        }
    }

    pub fn from_params(params: &WaterParams) -> Self {
        Self::new(
            params.wavelength,
            params.peak,
            Vec2::from_array(params.direction),
        )
    }

    /// Angular wave number `k = 2*pi / wavelength`
    pub fn wave_number(&self) -> f32 {
        TAU / self.wavelength
    }

    /// Deep-water phase speed `c = sqrt(g / k)`
    pub fn phase_speed(&self) -> f32 {
        (GRAVITY / self.wave_number()).sqrt()
    }

    /// Displacement radius of each surface particle
    pub fn amplitude(&self) -> f32 {
        let k = self.wave_number();
        (k * (self.peak - 1.0)).exp() / k
    }

    /// Displaced position of a rest-state surface point at time `time_s`
    ///
    /// Particles trace circles: horizontal offset along the direction is
    /// `A sin(theta)`, vertical offset is `-A cos(theta)`, with
    /// `theta = k * (dot(p.xz, dir) + c * t)`.
    pub fn displace(&self, position: Vec3, time_s: f32) -> Vec3 {
        let k = self.wave_number();
        let along = position.x * self.direction.x + position.z * self.direction.y;
        let theta = k * (along + self.phase_speed() * time_s);
        let (sin, cos) = theta.sin_cos();
        let amplitude = self.amplitude();

        position
            + Vec3::new(
                self.direction.x * amplitude * sin,
                -amplitude * cos,
                self.direction.y * amplitude * sin,
            )
    }

    /// Packed shader parameters: (wavelength, peak, dir.x, dir.z)
    pub fn uniform(&self) -> [f32; 4] {
        [
            self.wavelength,
            self.peak,
            self.direction.x,
            self.direction.y,
        ]
    }
}

/// Water grid plus the wave that animates it
#[derive(Debug, Clone)]
pub struct WaterSurface {
    pub mesh: MeshData,
    pub wave: GerstnerWave,
    pub color: [f32; 4],
}

impl WaterSurface {
    pub fn new(params: &WaterParams) -> MeshResult<Self> {
        let mesh = create_grid(params.width, params.depth, params.rows, params.cols)?;
        Ok(Self {
            mesh,
            wave: GerstnerWave::from_params(params),
            color: params.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_wave() -> GerstnerWave {
        GerstnerWave::from_params(&WaterParams::default())
    }

    #[test]
    fn test_unit_peak_amplitude_is_inverse_wave_number() {
        let wave = default_wave();
        assert!((wave.amplitude() - 1.0 / wave.wave_number()).abs() < 1e-6);
        assert!((wave.wave_number() - TAU / 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_particles_move_on_circles() {
        let wave = default_wave();
        let rest = Vec3::new(1.3, 0.0, -2.0);
        for step in 0..16 {
            let offset = wave.displace(rest, step as f32 * 0.1) - rest;
            assert!((offset.length() - wave.amplitude()).abs() < 1e-4);
            // Default direction is +x: nothing moves along z
            assert!(offset.z.abs() < 1e-6);
        }
    }

    #[test]
    fn test_displacement_periodic_in_space() {
        let wave = default_wave();
        let a = Vec3::new(0.25, 0.0, 3.0);
        let b = a + Vec3::new(wave.wavelength, 0.0, 0.0);
        let da = wave.displace(a, 1.7) - a;
        let db = wave.displace(b, 1.7) - b;
        assert!((da - db).length() < 1e-4);
    }

    #[test]
    fn test_displacement_periodic_in_time() {
        let wave = default_wave();
        let period = wave.wavelength / wave.phase_speed();
        let p = Vec3::new(-4.0, 0.0, 1.0);
        let d0 = wave.displace(p, 0.5);
        let d1 = wave.displace(p, 0.5 + period);
        assert!((d0 - d1).length() < 1e-3);
    }

    #[test]
    fn test_direction_is_normalized() {
        let wave = GerstnerWave::new(4.0, 1.0, Vec2::new(3.0, 4.0));
        assert!((wave.direction.length() - 1.0).abs() < 1e-6);

        let fallback = GerstnerWave::new(4.0, 1.0, Vec2::ZERO);
        assert_eq!(fallback.direction, Vec2::X);
    }

    #[test]
    fn test_water_surface_grid() {
        let params = WaterParams::default();
        let water = WaterSurface::new(&params).unwrap();
        assert_eq!(water.mesh.vertices.len(), params.rows * params.cols);
        assert_eq!(water.wave.uniform(), [4.0, 1.0, 1.0, 0.0]);
    }
}
