//! Quad certification by neighbour corroboration.

use polymesh::FaceId;
use tracing::trace;

use crate::explorer::FaceExplorer;
use crate::topology::{common_vertex_count, neighbor_faces};

/// Mark a quad correct if enough of its neighbours already are.
///
/// - fewer than two correct neighbours: undetermined
/// - exactly two: only if those two touch each other, since a quad
///   sandwiched between two unrelated correct faces proves nothing
/// - three or four: correct
///
/// Returns whether the quad was marked. Never edits the mesh.
pub fn classify_quad(explorer: &mut FaceExplorer<'_>, quad: FaceId) -> bool {
    let neighbors = neighbor_faces(explorer.mesh(), quad);
    let valid = explorer.correct_among(&neighbors);

    match valid.len() {
        0 | 1 => {
            trace!("classify_quad: {:?} has {} correct neighbours", quad, valid.len());
            false
        }
        2 => {
            let mut pair = valid.iter().copied();
            let (Some(a), Some(b)) = (pair.next(), pair.next()) else {
                return false;
            };
            if common_vertex_count(explorer.mesh(), a, b) == 0 {
                trace!(
                    "classify_quad: {:?} sits between unrelated faces {:?} and {:?}",
                    quad, a, b
                );
                return false;
            }
            explorer.mark_correct(quad)
        }
        _ => explorer.mark_correct(quad),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{cell, grid_mesh};

    fn seeded(mesh: &polymesh::PolyMesh, cols: usize, cells: &[(usize, usize)]) -> Vec<FaceId> {
        cells.iter().map(|&(x, y)| cell(mesh, cols, x, y)).collect()
    }

    #[test]
    fn test_three_correct_neighbours_certify() {
        // +---+---+---+
        // |   |   |   |
        // +---+---+---+
        // | S | ? | S |
        // +---+---+---+
        // |   | S |   |
        // +---+---+---+
        let mut mesh = grid_mesh(3, 3, &[], &[]);
        let seeds = seeded(&mesh, 3, &[(1, 0), (0, 1), (2, 1)]);
        let center = cell(&mesh, 3, 1, 1);
        let faces_before = mesh.face_ids();
        let edges_before = mesh.edge_count();

        let mut explorer = FaceExplorer::new(&mut mesh, seeds);
        assert!(classify_quad(&mut explorer, center));
        assert!(explorer.is_correct(center));
        assert_eq!(explorer.stats().mutations(), 0);

        assert_eq!(mesh.face_ids(), faces_before);
        assert_eq!(mesh.edge_count(), edges_before);
    }

    #[test]
    fn test_two_unrelated_neighbours_defer() {
        // +---+---+---+
        // | S | ? | S |
        // +---+---+---+
        let mut mesh = grid_mesh(3, 1, &[], &[]);
        let seeds = seeded(&mesh, 3, &[(0, 0), (2, 0)]);
        let middle = cell(&mesh, 3, 1, 0);

        let mut explorer = FaceExplorer::new(&mut mesh, seeds);

        assert!(!classify_quad(&mut explorer, middle));
        assert!(!explorer.is_correct(middle));
        assert!(!explorer.is_dirty());
    }

    #[test]
    fn test_two_touching_neighbours_certify() {
        // +---+---+
        // |   | S |
        // +---+---+
        // | S | ? |
        // +---+---+
        let mut mesh = grid_mesh(2, 2, &[], &[]);
        let seeds = seeded(&mesh, 2, &[(1, 1), (0, 0)]);
        let bottom_right = cell(&mesh, 2, 1, 0);

        let mut explorer = FaceExplorer::new(&mut mesh, seeds);

        assert!(classify_quad(&mut explorer, bottom_right));
        assert!(explorer.is_correct(bottom_right));
    }

    #[test]
    fn test_single_neighbour_is_undetermined() {
        let mut mesh = grid_mesh(2, 1, &[], &[]);
        let seeds = seeded(&mesh, 2, &[(0, 0)]);
        let right = cell(&mesh, 2, 1, 0);

        let mut explorer = FaceExplorer::new(&mut mesh, seeds);

        assert!(!classify_quad(&mut explorer, right));
        assert_eq!(explorer.correct_faces().len(), 1);
    }
}
