//! Grid meshes shared by the unit tests.
//!
//! Vertices sit on integer lattice points `(x, y)` with
//! `0 <= x <= cols` and `0 <= y <= rows`; cell `(x, y)` is the unit square
//! whose lower-left corner is `(x, y)`, wound counter-clockwise.

use glam::Vec3;
use polymesh::{FaceId, PolyMesh, VertexId};
use std::collections::BTreeSet;

/// Vertex at lattice point `(x, y)` of a grid `cols` cells wide.
pub fn v(cols: usize, x: usize, y: usize) -> VertexId {
    VertexId((y * (cols + 1) + x) as u32)
}

/// Corners of cell `(x, y)` in winding order.
pub fn cell_corners(cols: usize, x: usize, y: usize) -> [VertexId; 4] {
    [
        v(cols, x, y),
        v(cols, x + 1, y),
        v(cols, x + 1, y + 1),
        v(cols, x, y + 1),
    ]
}

/// Build a grid, leaving out the `skip` cells and appending `extra` faces.
pub fn grid_mesh(
    cols: usize,
    rows: usize,
    skip: &[(usize, usize)],
    extra: &[Vec<VertexId>],
) -> PolyMesh {
    let mut positions = Vec::new();
    for y in 0..=rows {
        for x in 0..=cols {
            positions.push(Vec3::new(x as f32, y as f32, 0.0));
        }
    }

    let mut polygons: Vec<Vec<u32>> = Vec::new();
    for y in 0..rows {
        for x in 0..cols {
            if skip.contains(&(x, y)) {
                continue;
            }
            polygons.push(cell_corners(cols, x, y).iter().map(|c| c.0).collect());
        }
    }
    polygons.extend(extra.iter().map(|f| f.iter().map(|c| c.0).collect::<Vec<u32>>()));

    PolyMesh::from_polygons(&positions, &polygons).unwrap()
}

/// The live face whose corners are exactly `corners`, in any order.
pub fn face_with(mesh: &PolyMesh, corners: &[VertexId]) -> Option<FaceId> {
    let wanted: BTreeSet<VertexId> = corners.iter().copied().collect();
    mesh.faces()
        .find(|f| f.vertices().iter().copied().collect::<BTreeSet<_>>() == wanted)
        .map(|f| f.id)
}

/// The live face covering cell `(x, y)`.
pub fn cell(mesh: &PolyMesh, cols: usize, x: usize, y: usize) -> FaceId {
    face_with(mesh, &cell_corners(cols, x, y)).unwrap()
}

/// Select the listed cells of a grid.
pub fn select_cells(mesh: &mut PolyMesh, cols: usize, cells: &[(usize, usize)]) {
    for &(x, y) in cells {
        let face = cell(mesh, cols, x, y);
        mesh.select_face(face, true);
    }
}

/// Every cell of a `cols` x `rows` grid except `skip`.
pub fn all_cells_except(cols: usize, rows: usize, skip: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for y in 0..rows {
        for x in 0..cols {
            if !skip.contains(&(x, y)) {
                cells.push((x, y));
            }
        }
    }
    cells
}
