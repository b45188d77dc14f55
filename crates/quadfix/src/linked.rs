//! Flood-fill selection across quads.

use polymesh::{FaceId, PolyMesh};
use std::collections::VecDeque;
use tracing::debug;

/// Grow the face selection across edges, stopping at anything that is not a
/// quad.
///
/// Returns the number of faces newly selected.
pub fn select_linked_quads(mesh: &mut PolyMesh) -> usize {
    let mut frontier = VecDeque::new();
    for face in mesh.selected_faces() {
        push_edge_neighbors(mesh, face, &mut frontier);
    }

    let mut added = 0;
    while let Some(face) = frontier.pop_front() {
        if !mesh.is_face_valid(face) || mesh.is_face_selected(face) {
            continue;
        }
        if mesh.face_degree(face) != 4 {
            continue;
        }
        mesh.select_face(face, true);
        added += 1;
        push_edge_neighbors(mesh, face, &mut frontier);
    }

    debug!("select_linked_quads: selected {} more faces", added);
    added
}

/// Queue every other face on every edge of `face`, including all faces of a
/// non-manifold edge.
fn push_edge_neighbors(mesh: &PolyMesh, face: FaceId, frontier: &mut VecDeque<FaceId>) {
    for &edge in mesh.face_edges(face) {
        frontier.extend(mesh.edge_faces(edge).iter().copied().filter(|&f| f != face));
    }
}
