//! End-to-end terrain generation through the public API.

use wavefield::mesh::{create_grid, MeshError};
use wavefield::noise::NoiseField;
use wavefield::terrain::{TerrainBuilder, TERRAIN_BASELINE};

#[test]
fn test_full_size_terrain() {
    let mesh = TerrainBuilder::build(100.0, 100.0, 100, 100, 42).unwrap();

    assert_eq!(mesh.vertices.len(), 10_000);
    assert_eq!(mesh.indices.len(), 6 * 99 * 99);
    assert_eq!(mesh.indices.len(), 58_806);
    assert_eq!(mesh.triangle_count(), 2 * 99 * 99);
    assert!(mesh.indices.iter().all(|&i| i < 10_000));

    let max = TERRAIN_BASELINE + NoiseField::max_height() + 1e-5;
    for v in &mesh.vertices {
        let y = v.position[1];
        assert!(
            (TERRAIN_BASELINE..=max).contains(&y),
            "height {} outside [{}, {}]",
            y,
            TERRAIN_BASELINE,
            max
        );
    }
}

#[test]
fn test_terrain_corners_keep_grid_extent() {
    let mesh = TerrainBuilder::build(100.0, 60.0, 11, 21, 7).unwrap();

    let first = mesh.vertices[0].position;
    let last = mesh.vertices[mesh.vertices.len() - 1].position;
    assert_eq!((first[0], first[2]), (-50.0, 30.0));
    assert_eq!((last[0], last[2]), (50.0, -30.0));
}

#[test]
fn test_terrain_is_reproducible() {
    let a = TerrainBuilder::build(100.0, 100.0, 100, 100, 42).unwrap();
    let b = TerrainBuilder::build(100.0, 100.0, 100, 100, 42).unwrap();
    assert_eq!(a.vertex_bytes(), b.vertex_bytes());
    assert_eq!(a.index_bytes(), b.index_bytes());

    let c = TerrainBuilder::build(100.0, 100.0, 100, 100, 43).unwrap();
    assert_ne!(a.vertex_bytes(), c.vertex_bytes());
}

#[test]
fn test_terrain_normals_are_placeholders_until_recomputed() {
    let mut mesh = TerrainBuilder::build(20.0, 20.0, 16, 16, 5).unwrap();
    assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));

    mesh.recompute_normals();
    assert!(mesh.vertices.iter().any(|v| v.normal != [0.0, 1.0, 0.0]));
}

#[test]
fn test_invalid_dimensions_are_rejected() {
    for (w, d, rows, cols) in [
        (100.0, 100.0, 1, 100),
        (100.0, 100.0, 100, 0),
        (0.0, 100.0, 10, 10),
        (100.0, -1.0, 10, 10),
    ] {
        let err = TerrainBuilder::build(w, d, rows, cols, 1).unwrap_err();
        assert!(matches!(err, MeshError::InvalidArgument { .. }));
        assert!(create_grid(w, d, rows, cols).is_err());
    }
}
