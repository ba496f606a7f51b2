//! Phong light sources and their GPU uniform layout.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Number of point lights the shader loops over
pub const MAX_POINT_LIGHTS: usize = 3;

/// Specular exponent for lit materials
pub const SHININESS: f32 = 32.0;

/// Ambient, diffuse and specular intensities (RGB)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phong {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Phong {
    pub fn gray(ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            ambient: Vec3::splat(ambient),
            diffuse: Vec3::splat(diffuse),
            specular: Vec3::splat(specular),
        }
    }
}

/// Distance falloff `1 / (constant + linear*d + quadratic*d^2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    /// Roughly a 50 unit range
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

impl Attenuation {
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    fn to_array(self) -> [f32; 4] {
        [self.constant, self.linear, self.quadratic, 0.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirLight {
    pub direction: Vec3,
    pub color: Phong,
}

impl Default for DirLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            color: Phong::gray(0.05, 0.4, 0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Phong,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            color: Phong::gray(0.05, 0.8, 1.0),
            attenuation: Attenuation::default(),
        }
    }
}

/// Cone light; cutoffs are stored as cosines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Phong,
    pub attenuation: Attenuation,
    pub cut_off: f32,
    pub outer_cut_off: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            color: Phong::gray(0.0, 1.0, 1.0),
            attenuation: Attenuation::default(),
            cut_off: 12.5_f32.to_radians().cos(),
            outer_cut_off: 15.0_f32.to_radians().cos(),
        }
    }
}

impl SpotLight {
    /// Soft-edge intensity for a fragment at `point`
    ///
    /// 1 inside the inner cone, 0 outside the outer cone, linear in
    /// between on the cosine of the angle.
    pub fn cone_intensity(&self, point: Vec3) -> f32 {
        let to_point = (point - self.position).normalize_or_zero();
        let theta = to_point.dot(self.direction.normalize_or_zero());
        let epsilon = self.cut_off - self.outer_cut_off;
        ((theta - self.outer_cut_off) / epsilon).clamp(0.0, 1.0)
    }
}

/// All lights in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLights {
    pub directional: DirLight,
    pub points: [PointLight; MAX_POINT_LIGHTS],
    pub spot: SpotLight,
}

impl Default for SceneLights {
    fn default() -> Self {
        Self {
            directional: DirLight::default(),
            points: [
                PointLight::at(Vec3::new(20.0, 1.5, 20.0)),
                PointLight::at(Vec3::new(-10.0, 1.5, -10.0)),
                PointLight::at(Vec3::new(-15.0, 1.5, 0.0)),
            ],
            spot: SpotLight::default(),
        }
    }
}

impl SceneLights {
    /// Attach the spot light to an eye position and view direction
    pub fn follow_camera(&mut self, position: Vec3, front: Vec3) {
        self.spot.position = position;
        self.spot.direction = front;
    }

    pub fn to_uniform(&self) -> LightingUniform {
        LightingUniform {
            directional: DirLightRaw {
                direction: extend(self.directional.direction),
                ambient: extend(self.directional.color.ambient),
                diffuse: extend(self.directional.color.diffuse),
                specular: extend(self.directional.color.specular),
            },
            points: self.points.map(|p| PointLightRaw {
                position: extend(p.position),
                ambient: extend(p.color.ambient),
                diffuse: extend(p.color.diffuse),
                specular: extend(p.color.specular),
                attenuation: p.attenuation.to_array(),
            }),
            spot: SpotLightRaw {
                position: extend(self.spot.position),
                direction: extend(self.spot.direction),
                ambient: extend(self.spot.color.ambient),
                diffuse: extend(self.spot.color.diffuse),
                specular: extend(self.spot.color.specular),
                attenuation: self.spot.attenuation.to_array(),
                cut_off: [self.spot.cut_off, self.spot.outer_cut_off, 0.0, 0.0],
            },
        }
    }
}

fn extend(v: Vec3) -> [f32; 4] {
    v.extend(0.0).to_array()
}

// GPU layouts: every field is a vec4 so WGSL uniform alignment matches.

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DirLightRaw {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub attenuation: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SpotLightRaw {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub attenuation: [f32; 4],
    /// (cos inner, cos outer, _, _)
    pub cut_off: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightingUniform {
    pub directional: DirLightRaw,
    pub points: [PointLightRaw; MAX_POINT_LIGHTS],
    pub spot: SpotLightRaw,
}
