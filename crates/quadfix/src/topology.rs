//! Read-only adjacency helpers used by the classifiers.
//!
//! These never mutate the mesh. Set-valued results use `BTreeSet` so the
//! order in which candidates are tried follows element IDs.

use polymesh::{EdgeId, FaceId, PolyMesh, VertexId};
use std::collections::BTreeSet;
use tracing::warn;

/// Anything with a set of corner vertices: faces and edges.
pub trait VertexSpan: Copy {
    fn span(self, mesh: &PolyMesh) -> Vec<VertexId>;
}

impl VertexSpan for FaceId {
    fn span(self, mesh: &PolyMesh) -> Vec<VertexId> {
        mesh.face_vertices(self).to_vec()
    }
}

impl VertexSpan for EdgeId {
    fn span(self, mesh: &PolyMesh) -> Vec<VertexId> {
        mesh.edge_vertices(self).map(Vec::from).unwrap_or_default()
    }
}

/// The other face bordering `edge`.
///
/// Returns `None` for boundary edges. Non-manifold edges are reported and
/// also return `None`; callers must not treat them as boundary.
pub fn opposite_face(mesh: &PolyMesh, face: FaceId, edge: EdgeId) -> Option<FaceId> {
    let faces = mesh.edge_faces(edge);
    if !faces.contains(&face) {
        warn!("opposite_face: {:?} does not border {:?}", edge, face);
        return None;
    }
    match faces {
        [_] => None,
        [a, b] => Some(if *a == face { *b } else { *a }),
        _ => {
            warn!(
                "opposite_face: edge {:?} borders {} faces, treating as unsupported",
                edge,
                faces.len()
            );
            None
        }
    }
}

/// Faces sharing an edge with `face`.
pub fn neighbor_faces(mesh: &PolyMesh, face: FaceId) -> BTreeSet<FaceId> {
    mesh.face_edges(face)
        .iter()
        .filter_map(|&edge| opposite_face(mesh, face, edge))
        .collect()
}

/// Number of vertices two faces or edges have in common.
pub fn common_vertex_count(mesh: &PolyMesh, a: impl VertexSpan, b: impl VertexSpan) -> usize {
    let a: BTreeSet<VertexId> = a.span(mesh).into_iter().collect();
    b.span(mesh).iter().filter(|v| a.contains(v)).count()
}

/// Remove and return the lowest-ID face of exactly `degree` sides.
pub fn pop_face_of_degree(
    mesh: &PolyMesh,
    faces: &mut BTreeSet<FaceId>,
    degree: usize,
) -> Option<FaceId> {
    let found = faces
        .iter()
        .copied()
        .find(|&f| mesh.face_degree(f) == degree)?;
    faces.remove(&found);
    Some(found)
}

/// The side of `face` spanning the symmetric difference of two vertex pairs.
///
/// With `cut_pair` a diagonal of a quad and `edge_pair` a side shared with a
/// neighbouring triangle, this is the quad side that closes the triangle
/// `edge_pair` + `cut_pair` when the quad is cut along the diagonal.
pub fn edge_completing_triangle(
    mesh: &PolyMesh,
    face: FaceId,
    cut_pair: [VertexId; 2],
    edge_pair: [VertexId; 2],
) -> Option<EdgeId> {
    let cut: BTreeSet<VertexId> = cut_pair.into_iter().collect();
    let side: BTreeSet<VertexId> = edge_pair.into_iter().collect();
    let search: BTreeSet<VertexId> = cut.symmetric_difference(&side).copied().collect();
    if search.len() != 2 {
        return None;
    }

    mesh.face_edges(face).iter().copied().find(|&edge| {
        mesh.edge_vertices(edge)
            .is_some_and(|pair| pair.into_iter().collect::<BTreeSet<_>>() == search)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{cell, grid_mesh, v};

    #[test]
    fn test_opposite_face_across_shared_edge() {
        let mesh = grid_mesh(2, 1, &[], &[]);
        let left = cell(&mesh, 2, 0, 0);
        let right = cell(&mesh, 2, 1, 0);
        let shared = mesh.find_edge(v(2, 1, 0), v(2, 1, 1)).unwrap();
        let boundary = mesh.find_edge(v(2, 0, 0), v(2, 1, 0)).unwrap();

        assert_eq!(opposite_face(&mesh, left, shared), Some(right));
        assert_eq!(opposite_face(&mesh, right, shared), Some(left));
        assert_eq!(opposite_face(&mesh, left, boundary), None);
    }

    #[test]
    fn test_neighbors_of_center_cell() {
        let mesh = grid_mesh(3, 3, &[], &[]);
        let center = cell(&mesh, 3, 1, 1);

        let neighbors = neighbor_faces(&mesh, center);

        let expected: BTreeSet<FaceId> = [(1, 0), (0, 1), (2, 1), (1, 2)]
            .into_iter()
            .map(|(x, y)| cell(&mesh, 3, x, y))
            .collect();
        assert_eq!(neighbors, expected);
    }

    #[test]
    fn test_common_vertex_count_faces_and_edges() {
        let mesh = grid_mesh(2, 2, &[], &[]);
        let bottom_left = cell(&mesh, 2, 0, 0);
        let bottom_right = cell(&mesh, 2, 1, 0);
        let top_right = cell(&mesh, 2, 1, 1);
        let bottom = mesh.find_edge(v(2, 0, 0), v(2, 1, 0)).unwrap();
        let up = mesh.find_edge(v(2, 1, 0), v(2, 1, 1)).unwrap();

        assert_eq!(common_vertex_count(&mesh, bottom_left, bottom_right), 2);
        assert_eq!(common_vertex_count(&mesh, bottom_left, top_right), 1);
        assert_eq!(common_vertex_count(&mesh, bottom, up), 1);
        assert_eq!(common_vertex_count(&mesh, bottom, top_right), 0);
    }

    #[test]
    fn test_pop_face_of_degree() {
        let mesh = grid_mesh(2, 1, &[(1, 0)], &[vec![v(2, 1, 0), v(2, 2, 0), v(2, 2, 1)]]);
        let quad = cell(&mesh, 2, 0, 0);
        let mut faces: BTreeSet<FaceId> = mesh.face_ids().into_iter().collect();

        let tri = pop_face_of_degree(&mesh, &mut faces, 3).unwrap();
        assert_eq!(mesh.face_degree(tri), 3);
        assert_eq!(pop_face_of_degree(&mesh, &mut faces, 3), None);
        assert_eq!(pop_face_of_degree(&mesh, &mut faces, 4), Some(quad));
        assert!(faces.is_empty());
    }

    #[test]
    fn test_edge_completing_triangle() {
        let mesh = grid_mesh(1, 1, &[], &[]);
        let quad = cell(&mesh, 1, 0, 0);
        let (a, b, c, d) = (v(1, 0, 0), v(1, 1, 0), v(1, 1, 1), v(1, 0, 1));

        // Cutting a-c next to side a-b leaves triangle a-b-c, closed by b-c
        let completing = edge_completing_triangle(&mesh, quad, [a, c], [a, b]).unwrap();
        assert_eq!(mesh.edge_vertices(completing), Some([b, c]));

        // Same pair twice has an empty difference
        assert_eq!(edge_completing_triangle(&mesh, quad, [b, d], [b, d]), None);
        // Difference a-c is a diagonal, not a side
        assert_eq!(edge_completing_triangle(&mesh, quad, [a, b], [b, c]), None);
    }
}
