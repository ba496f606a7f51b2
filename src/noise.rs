//! Value noise for terrain heights.
//!
//! Integer lattice points get a pseudo-random value in `{0, 1, 2}` from a
//! pure hash of `(x, z, seed)`; the lattice is low-pass filtered with a 3x3
//! kernel, cosine-interpolated between lattice points and summed over two
//! octaves. Sampling has no hidden state, so the same `(seed, x, z)` always
//! yields the same height regardless of call order or thread.

use std::f64::consts::PI;

/// Height scale of the first octave
pub const AMPLITUDE: f32 = 1.0;

/// Lattice values are drawn from `0..LATTICE_RANGE`
pub const LATTICE_RANGE: u64 = 3;

/// 3x3 low-pass kernel: corners 1/16, edges 1/8, center 1/4
pub const SMOOTHING_KERNEL: [[f32; 3]; 3] = [
    [1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0],
    [1.0 / 8.0, 1.0 / 4.0, 1.0 / 8.0],
    [1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0],
];

/// Octaves summed by [`NoiseField::height`] as (coordinate divisor, amplitude)
pub const OCTAVES: [(f32, f32); 2] = [(4.0, AMPLITUDE), (2.0, AMPLITUDE / 3.0)];

/// Deterministic seeded height field over the xz-plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseField {
    seed: u32,
}

impl NoiseField {
    /// Create a noise field; the seed is the only state
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw lattice value at integer coordinates, in `[0, 3)`
    pub fn lattice(&self, x: i32, z: i32) -> f32 {
        (lattice_hash(x, z, self.seed) % LATTICE_RANGE) as f32
    }

    /// Lattice value blended with its 8 neighbours through [`SMOOTHING_KERNEL`]
    pub fn smoothed(&self, x: i32, z: i32) -> f32 {
        let mut total = 0.0;
        for (dz, row) in (-1..=1).zip(SMOOTHING_KERNEL) {
            for (dx, weight) in (-1..=1).zip(row) {
                total += self.lattice(x.wrapping_add(dx), z.wrapping_add(dz)) * weight;
            }
        }
        total
    }

    /// Continuous noise: smoothed lattice values at the four surrounding
    /// integer points, cosine-interpolated along x then z
    pub fn interpolated(&self, x: f32, z: f32) -> f32 {
        let floor_x = x.floor();
        let floor_z = z.floor();
        let ix = floor_x as i32;
        let iz = floor_z as i32;
        let frac_x = x - floor_x;
        let frac_z = z - floor_z;

        let v1 = self.smoothed(ix, iz);
        let v2 = self.smoothed(ix.wrapping_add(1), iz);
        let v3 = self.smoothed(ix, iz.wrapping_add(1));
        let v4 = self.smoothed(ix.wrapping_add(1), iz.wrapping_add(1));

        let i1 = cosine_interpolate(v1, v2, frac_x);
        let i2 = cosine_interpolate(v3, v4, frac_x);

        cosine_interpolate(i1, i2, frac_z)
    }

    /// Terrain height at `(x, z)`: the sum of [`OCTAVES`]
    pub fn height(&self, x: f32, z: f32) -> f32 {
        OCTAVES
            .iter()
            .map(|&(divisor, amplitude)| self.interpolated(x / divisor, z / divisor) * amplitude)
            .sum()
    }

    /// Upper bound of [`NoiseField::height`]; the lower bound is 0
    pub fn max_height() -> f32 {
        let max_lattice = (LATTICE_RANGE - 1) as f32;
        OCTAVES.iter().map(|&(_, amplitude)| max_lattice * amplitude).sum()
    }
}

/// Blend `a` towards `b` with mixing factor `(1 - cos(t * pi)) / 2`
///
/// Exact at both ends (`t = 0` gives `a`, `t = 1` gives `b`) with zero slope
/// there, so adjacent lattice cells join smoothly.
pub fn cosine_interpolate(a: f32, b: f32, t: f32) -> f32 {
    let f = ((1.0 - (t as f64 * PI).cos()) * 0.5) as f32;
    a * (1.0 - f) + b * f
}

/// Mix integer lattice coordinates and seed into 64 well-distributed bits
fn lattice_hash(x: i32, z: i32, seed: u32) -> u64 {
    let mut h = (x as i64 as u64).wrapping_mul(0x27d4_eb2d);
    h ^= (z as i64 as u64).wrapping_mul(0x1656_6791_9E37_79F9);
    h ^= (seed as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);

    // splitmix64 finalizer
    h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_weights_sum_to_one() {
        let sum: f32 = SMOOTHING_KERNEL.iter().flatten().sum();
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn test_smoothed_stays_in_lattice_range() {
        // A weighted average of values in [0, 2] stays in [0, 2]
        let field = NoiseField::new(9);
        for x in -20..20 {
            for z in -20..20 {
                let s = field.smoothed(x, z);
                assert!((0.0..=2.0).contains(&s), "smoothed({}, {}) = {}", x, z, s);
            }
        }
    }

    #[test]
    fn test_lattice_values_are_small_integers() {
        let field = NoiseField::new(1234);
        let mut seen = [false; 3];
        for x in -50..50 {
            for z in -50..50 {
                let v = field.lattice(x, z);
                assert!((0.0..3.0).contains(&v));
                assert_eq!(v.fract(), 0.0);
                seen[v as usize] = true;
            }
        }
        assert_eq!(seen, [true; 3], "all lattice values should occur");
    }

    #[test]
    fn test_lattice_independent_of_call_history() {
        let field = NoiseField::new(77);
        let before = field.lattice(3, -8);
        for x in 0..100 {
            field.lattice(x, x * 7);
        }
        assert_eq!(field.lattice(3, -8), before);
        assert_eq!(NoiseField::new(77).lattice(3, -8), before);
    }

    #[test]
    fn test_seed_changes_field() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differing = (0..64)
            .filter(|&i| a.lattice(i, -i) != b.lattice(i, -i))
            .count();
        assert!(differing > 10, "only {} of 64 lattice points differ", differing);
    }

    #[test]
    fn test_cosine_interpolate_endpoints_exact() {
        for &(a, b) in &[(0.0, 1.0), (-3.5, 7.25), (2.0, 2.0), (1e6, -1e-3)] {
            assert_eq!(cosine_interpolate(a, b, 0.0), a);
            assert_eq!(cosine_interpolate(a, b, 1.0), b);
        }
    }

    #[test]
    fn test_cosine_interpolate_midpoint_and_monotonic() {
        assert!((cosine_interpolate(0.0, 4.0, 0.5) - 2.0).abs() < 1e-6);

        let mut last = cosine_interpolate(1.0, 3.0, 0.0);
        for step in 1..=20 {
            let value = cosine_interpolate(1.0, 3.0, step as f32 / 20.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_interpolated_matches_smoothed_on_lattice() {
        let field = NoiseField::new(5);
        for (x, z) in [(0, 0), (4, -3), (-7, 12)] {
            let expected = field.smoothed(x, z);
            let actual = field.interpolated(x as f32, z as f32);
            assert!((expected - actual).abs() < 1e-6);
        }
    }

    #[test]
    fn test_interpolated_is_continuous_across_cells() {
        let field = NoiseField::new(31);
        let eps = 1e-3;
        for x in [-2.0_f32, 0.0, 1.0, 5.0] {
            let left = field.interpolated(x - eps, 0.3);
            let right = field.interpolated(x + eps, 0.3);
            assert!((left - right).abs() < 1e-2, "jump at x={}", x);
        }
    }

    #[test]
    fn test_height_deterministic_and_bounded() {
        let field = NoiseField::new(42);
        let max = NoiseField::max_height();
        assert!((max - 8.0 / 3.0).abs() < 1e-6);

        for i in -40..40 {
            let (x, z) = (i as f32 * 1.37, i as f32 * -0.91);
            let h = field.height(x, z);
            assert_eq!(h, field.height(x, z));
            assert!((0.0..=max + 1e-5).contains(&h), "height({}, {}) = {}", x, z, h);
        }
    }
}
