//! CPU-side mesh data: interleaved vertices plus a triangle-list index buffer.
//!
//! Generators in this module never touch the GPU; the rendering layer uploads
//! a finished [`MeshData`] once and keeps only the buffer handles.

mod grid;
mod primitives;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use thiserror::Error;

pub use grid::create_grid;
pub use primitives::{create_box, create_cylinder, create_sphere};

/// Interleaved vertex: position, normal, texture coordinate (32 bytes)
///
/// Field order is the buffer layout: position at byte 0, normal at 12,
/// uv at 24.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Placeholder normal for flat, not-yet-lit geometry
    pub const UP: [f32; 3] = [0.0, 1.0, 0.0];

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Mesh generation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

pub type MeshResult<T> = Result<T, MeshError>;

impl MeshError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject non-finite or non-positive extents
pub(crate) fn require_positive(name: &'static str, value: f32) -> MeshResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MeshError::invalid(
            name,
            format!("must be finite and > 0, got {}", value),
        ))
    }
}

/// Reject tessellations whose vertices cannot be addressed by `u32` indices
///
/// Counts are computed by the caller with saturating `u64` arithmetic, so
/// any overflow surfaces here as an oversized count.
pub(crate) fn checked_counts(
    name: &'static str,
    vertex_count: u64,
    index_count: u64,
) -> MeshResult<(usize, usize)> {
    if vertex_count > u64::from(u32::MAX) {
        return Err(MeshError::invalid(
            name,
            format!("{} vertices overflow u32 indices", vertex_count),
        ));
    }
    let index_count = usize::try_from(index_count).map_err(|_| {
        MeshError::invalid(name, format!("{} indices do not fit in memory", index_count))
    })?;
    Ok((vertex_count as usize, index_count))
}

/// Vertices and triangle indices of one mesh
///
/// Vertex order and index order are both significant: consumers address
/// vertices positionally and draw indices in sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Line-list indices covering every triangle edge (wireframe drawing)
    pub fn line_indices(&self) -> Vec<u32> {
        let mut lines = Vec::with_capacity(self.indices.len() * 2);
        for [a, b, c] in self.triangles() {
            lines.extend_from_slice(&[a, b, b, c, c, a]);
        }
        lines
    }

    /// Packed vertex bytes in upload layout
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Packed index bytes in upload layout
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Replace every normal with the area-weighted average of adjacent face normals
    ///
    /// Vertices not referenced by any non-degenerate triangle keep [`Vertex::UP`].
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];

        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let pa = Vec3::from_array(self.vertices[a].position);
            let pb = Vec3::from_array(self.vertices[b].position);
            let pc = Vec3::from_array(self.vertices[c].position);

            // Unnormalized cross product weights by triangle area
            let face = (pb - pa).cross(pc - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accum) {
            vertex.normal = normal
                .try_normalize()
                .map(|n| n.to_array())
                .unwrap_or(Vertex::UP);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> MeshData {
        MeshData {
            vertices: vec![
                Vertex::new([0.0, 0.0, 0.0], Vertex::UP, [0.0, 0.0]),
                Vertex::new([1.0, 0.0, 0.0], Vertex::UP, [1.0, 0.0]),
                Vertex::new([0.0, 0.0, -1.0], Vertex::UP, [0.0, 1.0]),
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_vertex_layout_matches_buffer_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::offset_of!(Vertex, position), 0);
        assert_eq!(std::mem::offset_of!(Vertex, normal), 12);
        assert_eq!(std::mem::offset_of!(Vertex, uv), 24);
    }

    #[test]
    fn test_vertex_bytes_are_interleaved() {
        let mesh = single_triangle();
        let floats: &[f32] = bytemuck::cast_slice(mesh.vertex_bytes());

        assert_eq!(floats.len(), 3 * 8);
        // Second vertex: x, y, z, nx, ny, nz, u, v
        assert_eq!(&floats[8..16], &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
    }

    #[test]
    fn test_line_indices_cover_each_edge() {
        let mesh = single_triangle();
        assert_eq!(mesh.line_indices(), vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn test_recompute_normals_flat_triangle_points_up() {
        let mut mesh = single_triangle();
        for v in &mut mesh.vertices {
            v.normal = [0.0, 0.0, 0.0];
        }
        mesh.recompute_normals();

        for v in &mesh.vertices {
            assert!((v.normal[1] - 1.0).abs() < 1e-6, "normal {:?}", v.normal);
        }
    }

    #[test]
    fn test_recompute_normals_keeps_up_for_unreferenced_vertex() {
        let mut mesh = single_triangle();
        mesh.vertices
            .push(Vertex::new([5.0, 5.0, 5.0], [1.0, 0.0, 0.0], [0.0, 0.0]));
        mesh.recompute_normals();

        assert_eq!(mesh.vertices[3].normal, Vertex::UP);
    }

    #[test]
    fn test_recompute_normals_on_slope() {
        let mut mesh = MeshData {
            vertices: vec![
                Vertex::new([0.0, 0.0, 0.0], Vertex::UP, [0.0, 0.0]),
                Vertex::new([1.0, 1.0, 0.0], Vertex::UP, [1.0, 0.0]),
                Vertex::new([0.0, 0.0, -1.0], Vertex::UP, [0.0, 1.0]),
            ],
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.triangle_count(), 1);
        mesh.recompute_normals();

        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.normal) - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_checked_counts_rejects_u32_overflow() {
        assert_eq!(checked_counts("slice_count", 10, 36), Ok((10, 36)));
        assert_eq!(
            checked_counts("slice_count", u64::from(u32::MAX), 6),
            Ok((u32::MAX as usize, 6))
        );
        let err = checked_counts("slice_count", u64::from(u32::MAX) + 1, 6).unwrap_err();
        assert!(matches!(err, MeshError::InvalidArgument { name: "slice_count", .. }));
    }

    #[test]
    fn test_require_positive_rejects_nan_and_zero() {
        assert!(require_positive("width", 1.0).is_ok());
        assert!(require_positive("width", 0.0).is_err());
        assert!(require_positive("width", -3.0).is_err());
        assert!(require_positive("width", f32::NAN).is_err());
        assert!(require_positive("width", f32::INFINITY).is_err());
    }
}
