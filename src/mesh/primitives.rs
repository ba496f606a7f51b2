//! Parametric solids used as scene props: cylinder (or cone), UV sphere, box.
//!
//! All solids are centered at the origin, y-up, with triangles wound so the
//! face normal (right-handed cross product of the first two edges) points
//! outward.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use log::debug;

use super::{checked_counts, require_positive, MeshData, MeshError, MeshResult, Vertex};

/// Create a y-axis cylinder of `height`, tapering from `bottom_radius` to
/// `top_radius`, with closed caps
///
/// The side is `stack_count + 1` rings of `slice_count + 1` vertices (the
/// seam vertex is duplicated so u runs 0..1). Each cap adds a rim ring plus
/// a center vertex.
pub fn create_cylinder(
    bottom_radius: f32,
    top_radius: f32,
    height: f32,
    slice_count: u32,
    stack_count: u32,
) -> MeshResult<MeshData> {
    require_positive("height", height)?;
    if !(bottom_radius.is_finite() && bottom_radius >= 0.0) {
        return Err(MeshError::invalid(
            "bottom_radius",
            format!("must be finite and >= 0, got {}", bottom_radius),
        ));
    }
    if !(top_radius.is_finite() && top_radius >= 0.0) {
        return Err(MeshError::invalid(
            "top_radius",
            format!("must be finite and >= 0, got {}", top_radius),
        ));
    }
    if bottom_radius == 0.0 && top_radius == 0.0 {
        return Err(MeshError::invalid("bottom_radius", "both radii are zero"));
    }
    if slice_count < 3 {
        return Err(MeshError::invalid(
            "slice_count",
            format!("must be >= 3, got {}", slice_count),
        ));
    }
    if stack_count < 1 {
        return Err(MeshError::invalid("stack_count", "must be >= 1, got 0"));
    }

    let (slices, stacks) = (u64::from(slice_count), u64::from(stack_count));
    let (vertex_count, index_count) = checked_counts(
        "slice_count",
        (stacks + 1)
            .saturating_mul(slices + 1)
            .saturating_add(2 * (slices + 2)),
        slices.saturating_mul(stacks + 1).saturating_mul(6),
    )?;

    let ring_vertex_count = slice_count + 1;
    let mut mesh = MeshData::with_capacity(vertex_count, index_count);

    let stack_height = height / stack_count as f32;
    let radius_step = (top_radius - bottom_radius) / stack_count as f32;
    let d_theta = TAU / slice_count as f32;
    let dr = bottom_radius - top_radius;

    for i in 0..=stack_count {
        let y = -0.5 * height + i as f32 * stack_height;
        let r = bottom_radius + i as f32 * radius_step;

        for j in 0..=slice_count {
            let (s, c) = (j as f32 * d_theta).sin_cos();

            // Tangent around the ring crossed with the slant direction
            let tangent = Vec3::new(-s, 0.0, c);
            let bitangent = Vec3::new(dr * c, -height, dr * s);
            let normal = tangent.cross(bitangent).normalize();

            mesh.vertices.push(Vertex::new(
                [r * c, y, r * s],
                normal.to_array(),
                [
                    j as f32 / slice_count as f32,
                    1.0 - i as f32 / stack_count as f32,
                ],
            ));
        }
    }

    for i in 0..stack_count {
        for j in 0..slice_count {
            let a = i * ring_vertex_count + j;
            let b = (i + 1) * ring_vertex_count + j;

            mesh.indices
                .extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
        }
    }

    build_cylinder_cap(&mut mesh, top_radius, height, slice_count, true);
    build_cylinder_cap(&mut mesh, bottom_radius, height, slice_count, false);

    debug!(
        "Cylinder r={}..{} h={}: {} vertices, {} indices",
        bottom_radius,
        top_radius,
        height,
        mesh.vertices.len(),
        mesh.indices.len()
    );

    Ok(mesh)
}

/// Append a flat cap (rim ring plus center) at the top or bottom of a cylinder
fn build_cylinder_cap(mesh: &mut MeshData, radius: f32, height: f32, slice_count: u32, top: bool) {
    let base_index = mesh.vertices.len() as u32;
    let (y, normal) = if top {
        (0.5 * height, [0.0, 1.0, 0.0])
    } else {
        (-0.5 * height, [0.0, -1.0, 0.0])
    };
    let d_theta = TAU / slice_count as f32;

    for i in 0..=slice_count {
        let (s, c) = (i as f32 * d_theta).sin_cos();
        let x = radius * c;
        let z = radius * s;

        // Planar projection of the cap, scaled by height
        let u = x / height + 0.5;
        let v = z / height + 0.5;

        mesh.vertices.push(Vertex::new([x, y, z], normal, [u, v]));
    }

    mesh.vertices
        .push(Vertex::new([0.0, y, 0.0], normal, [0.5, 0.5]));
    let center = mesh.vertices.len() as u32 - 1;

    for i in 0..slice_count {
        let rim = base_index + i;
        if top {
            mesh.indices.extend_from_slice(&[center, rim + 1, rim]);
        } else {
            mesh.indices.extend_from_slice(&[center, rim, rim + 1]);
        }
    }
}

/// Create a UV sphere of `radius`
///
/// Poles are single vertices; between them sit `stack_count - 1` rings of
/// `slice_count + 1` vertices. Normals are the unit position.
pub fn create_sphere(radius: f32, slice_count: u32, stack_count: u32) -> MeshResult<MeshData> {
    require_positive("radius", radius)?;
    if slice_count < 3 {
        return Err(MeshError::invalid(
            "slice_count",
            format!("must be >= 3, got {}", slice_count),
        ));
    }
    if stack_count < 2 {
        return Err(MeshError::invalid(
            "stack_count",
            format!("must be >= 2, got {}", stack_count),
        ));
    }

    let (slices, stacks) = (u64::from(slice_count), u64::from(stack_count));
    let (vertex_count, index_count) = checked_counts(
        "slice_count",
        (stacks - 1).saturating_mul(slices + 1).saturating_add(2),
        slices.saturating_mul(stacks - 1).saturating_mul(6),
    )?;

    let ring_vertex_count = slice_count + 1;
    let mut mesh = MeshData::with_capacity(vertex_count, index_count);

    let phi_step = PI / stack_count as f32;
    let theta_step = TAU / slice_count as f32;

    mesh.vertices
        .push(Vertex::new([0.0, radius, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]));

    for i in 1..stack_count {
        let phi = i as f32 * phi_step;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for j in 0..=slice_count {
            let theta = j as f32 * theta_step;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            mesh.vertices.push(Vertex::new(
                [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                [theta / TAU, phi / PI],
            ));
        }
    }

    mesh.vertices
        .push(Vertex::new([0.0, -radius, 0.0], [0.0, -1.0, 0.0], [0.0, 1.0]));

    // North cap fans from vertex 0 into the first ring
    for j in 1..=slice_count {
        mesh.indices.extend_from_slice(&[0, j + 1, j]);
    }

    // Bands between rings; ring 0 starts at vertex 1
    let base_index = 1;
    for i in 0..stack_count - 2 {
        for j in 0..slice_count {
            let a = base_index + i * ring_vertex_count + j;
            let b = base_index + (i + 1) * ring_vertex_count + j;

            mesh.indices
                .extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
        }
    }

    // South cap fans from the last vertex into the last ring
    let south = mesh.vertices.len() as u32 - 1;
    let last_ring = south - ring_vertex_count;
    for j in 0..slice_count {
        mesh.indices
            .extend_from_slice(&[south, last_ring + j, last_ring + j + 1]);
    }

    debug!(
        "Sphere r={}: {} vertices, {} indices",
        radius,
        mesh.vertices.len(),
        mesh.indices.len()
    );

    Ok(mesh)
}

/// Create an axis-aligned box with hard edges (4 vertices per face)
pub fn create_box(width: f32, height: f32, depth: f32) -> MeshResult<MeshData> {
    require_positive("width", width)?;
    require_positive("height", height)?;
    require_positive("depth", depth)?;

    let (w, h, d) = (0.5 * width, 0.5 * height, 0.5 * depth);

    // (normal, four corners in winding order); uv corners shared by all faces
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // -z
        (
            [0.0, 0.0, -1.0],
            [[-w, -h, -d], [-w, h, -d], [w, h, -d], [w, -h, -d]],
        ),
        // +z
        (
            [0.0, 0.0, 1.0],
            [[w, -h, d], [w, h, d], [-w, h, d], [-w, -h, d]],
        ),
        // +y
        (
            [0.0, 1.0, 0.0],
            [[-w, h, -d], [-w, h, d], [w, h, d], [w, h, -d]],
        ),
        // -y
        (
            [0.0, -1.0, 0.0],
            [[-w, -h, d], [-w, -h, -d], [w, -h, -d], [w, -h, d]],
        ),
        // -x
        (
            [-1.0, 0.0, 0.0],
            [[-w, -h, d], [-w, h, d], [-w, h, -d], [-w, -h, -d]],
        ),
        // +x
        (
            [1.0, 0.0, 0.0],
            [[w, -h, -d], [w, h, -d], [w, h, d], [w, -h, d]],
        ),
    ];
    const FACE_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];

    let mut mesh = MeshData::with_capacity(24, 36);
    for (normal, corners) in faces {
        let base = mesh.vertices.len() as u32;
        for (corner, uv) in corners.into_iter().zip(FACE_UVS) {
            mesh.vertices.push(Vertex::new(corner, normal, uv));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every triangle's face normal agrees with its vertex normals
    fn assert_outward(mesh: &MeshData) {
        for [a, b, c] in mesh.triangles() {
            let [va, vb, vc] = [a, b, c].map(|i| mesh.vertices[i as usize]);
            let pa = Vec3::from_array(va.position);
            let face = (Vec3::from_array(vb.position) - pa)
                .cross(Vec3::from_array(vc.position) - pa);
            let normal = Vec3::from_array(va.normal)
                + Vec3::from_array(vb.normal)
                + Vec3::from_array(vc.normal);
            assert!(
                face.dot(normal) > 0.0,
                "triangle {:?} winds inward ({:?} vs {:?})",
                [a, b, c],
                face,
                normal
            );
        }
    }

    fn assert_indices_in_range(mesh: &MeshData) {
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_cylinder_counts_and_winding() {
        let mesh = create_cylinder(0.5, 0.3, 3.0, 20, 20).unwrap();

        assert_eq!(mesh.vertices.len(), 21 * 21 + 2 * 22);
        assert_eq!(mesh.indices.len(), 6 * 20 * 20 + 2 * 3 * 20);
        assert_indices_in_range(&mesh);
        assert_outward(&mesh);
    }

    #[test]
    fn test_cylinder_extent() {
        let mesh = create_cylinder(0.5, 0.3, 3.0, 12, 4).unwrap();
        let (min_y, max_y) = mesh
            .vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| {
                (lo.min(v.position[1]), hi.max(v.position[1]))
            });

        assert!((min_y + 1.5).abs() < 1e-5);
        assert!((max_y - 1.5).abs() < 1e-5);

        // Side normals of a narrowing cylinder tilt upward
        assert!(mesh.vertices[0].normal[1] > 0.0);
    }

    #[test]
    fn test_sphere_counts_and_winding() {
        let mesh = create_sphere(0.5, 20, 20).unwrap();

        assert_eq!(mesh.vertices.len(), 2 + 19 * 21);
        assert_eq!(mesh.indices.len(), 6 * 20 * 19);
        assert_indices_in_range(&mesh);
        assert_outward(&mesh);
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let radius = 2.5;
        let mesh = create_sphere(radius, 8, 6).unwrap();

        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - radius).abs() < 1e-4);
            assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_minimum_tessellation() {
        // Two stacks: a single ring between the poles
        let mesh = create_sphere(1.0, 3, 2).unwrap();
        assert_eq!(mesh.vertices.len(), 2 + 4);
        assert_eq!(mesh.indices.len(), 6 * 3);
        assert_indices_in_range(&mesh);
        assert_outward(&mesh);
    }

    #[test]
    fn test_box_counts_and_winding() {
        let mesh = create_box(2.0, 1.0, 4.0).unwrap();

        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_indices_in_range(&mesh);
        assert_outward(&mesh);

        for v in &mesh.vertices {
            assert_eq!(v.position[0].abs(), 1.0);
            assert_eq!(v.position[1].abs(), 0.5);
            assert_eq!(v.position[2].abs(), 2.0);
        }
    }

    #[test]
    fn test_oversized_tessellation_rejected() {
        let err = create_cylinder(0.5, 0.3, 3.0, u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(err, MeshError::InvalidArgument { name: "slice_count", .. }));

        let err = create_sphere(1.0, 100_000, 100_000).unwrap_err();
        assert!(matches!(err, MeshError::InvalidArgument { name: "slice_count", .. }));
    }

    #[test]
    fn test_invalid_primitives_rejected() {
        assert!(create_cylinder(0.5, 0.3, 3.0, 2, 4).is_err());
        assert!(create_cylinder(0.5, 0.3, 3.0, 8, 0).is_err());
        assert!(create_cylinder(0.0, 0.0, 3.0, 8, 4).is_err());
        assert!(create_cylinder(-1.0, 0.3, 3.0, 8, 4).is_err());
        assert!(create_cylinder(0.5, 0.3, 0.0, 8, 4).is_err());
        assert!(create_sphere(0.0, 8, 8).is_err());
        assert!(create_sphere(1.0, 8, 1).is_err());
        assert!(create_box(1.0, f32::NAN, 1.0).is_err());
    }
}
