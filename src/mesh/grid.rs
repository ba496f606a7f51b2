//! Flat rectangular grid in the xz-plane.

use log::debug;

use super::{require_positive, MeshData, MeshError, MeshResult, Vertex};

/// Create a `rows x cols` vertex grid centered at the origin
///
/// Row `i` runs from `z = depth/2` (i = 0) towards `z = -depth/2`; column `j`
/// runs from `x = -width/2` towards `x = width/2`. Vertices are emitted
/// row-major (index `i * cols + j`) with `y = 0`, an up normal and
/// `uv = (j / (cols-1), i / (rows-1))`.
///
/// Each cell contributes two triangles,
/// `{i*cols+j, i*cols+j+1, (i+1)*cols+j}` and
/// `{(i+1)*cols+j, i*cols+j+1, (i+1)*cols+j+1}`, whose face normals point +y.
///
/// # Errors
/// `InvalidArgument` when `rows` or `cols` is below 2, when `width` or
/// `depth` is not a positive finite number, or when the vertex count does
/// not fit a `u32` index.
pub fn create_grid(width: f32, depth: f32, rows: usize, cols: usize) -> MeshResult<MeshData> {
    if rows < 2 {
        return Err(MeshError::invalid(
            "rows",
            format!("must be >= 2, got {}", rows),
        ));
    }
    if cols < 2 {
        return Err(MeshError::invalid(
            "cols",
            format!("must be >= 2, got {}", cols),
        ));
    }
    require_positive("width", width)?;
    require_positive("depth", depth)?;

    let vertex_count = rows
        .checked_mul(cols)
        .filter(|&n| n <= u32::MAX as usize)
        .ok_or_else(|| {
            MeshError::invalid("rows", format!("{} x {} vertices overflow u32", rows, cols))
        })?;
    let index_count = 6 * (rows - 1) * (cols - 1);

    let half_width = 0.5 * width;
    let half_depth = 0.5 * depth;

    let last_col = (cols - 1) as f32;
    let last_row = (rows - 1) as f32;

    let mut mesh = MeshData::with_capacity(vertex_count, index_count);

    // Positions are fractions of the extent: the far row and column land
    // exactly on the edges
    for i in 0..rows {
        let v = i as f32 / last_row;
        let z = half_depth - depth * v;
        for j in 0..cols {
            let u = j as f32 / last_col;
            let x = -half_width + width * u;
            mesh.vertices.push(Vertex::new([x, 0.0, z], Vertex::UP, [u, v]));
        }
    }

    let n = cols as u32;
    for i in 0..(rows - 1) as u32 {
        for j in 0..(cols - 1) as u32 {
            let top_left = i * n + j;
            let top_right = top_left + 1;
            let bottom_left = (i + 1) * n + j;
            let bottom_right = bottom_left + 1;

            mesh.indices.extend_from_slice(&[
                top_left,
                top_right,
                bottom_left,
                bottom_left,
                top_right,
                bottom_right,
            ]);
        }
    }

    debug!(
        "Grid {}x{} ({} x {}): {} vertices, {} indices",
        rows,
        cols,
        width,
        depth,
        mesh.vertices.len(),
        mesh.indices.len()
    );

    Ok(mesh)
}
