//! Triangle repair.
//!
//! A triangle on the border of the correct region is either half of a quad
//! that was split along a diagonal, or the result of a diagonal that was cut
//! on the wrong side of a neighbouring quad. The first case is fixed by
//! dissolving the shared edge of two triangles, the second by rotating the
//! edge a triangle shares with a quad. Both repairs only fire when the
//! surrounding correct faces pin down a single answer.

use polymesh::{EdgeId, FaceId, PolyMesh, VertexId};
use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::error::QuadFixError;
use crate::explorer::FaceExplorer;
use crate::topology::{common_vertex_count, edge_completing_triangle, neighbor_faces, opposite_face};
use crate::types::FaceOutcome;

/// Certify or repair a triangle.
///
/// A triangle whose three edges are all correct is certified as is.
/// Otherwise each incorrect edge is tried in face order, dissolve first and
/// rotation second; the first repair that fires ends the visit.
pub fn classify_triangle(
    explorer: &mut FaceExplorer<'_>,
    tri: FaceId,
) -> Result<FaceOutcome, QuadFixError> {
    let edges = explorer.mesh().face_edges(tri).to_vec();
    let mut all_correct = true;

    for edge in edges {
        if explorer.is_correct_edge(edge) {
            continue;
        }
        all_correct = false;
        if try_dissolve(explorer, edge)? || try_rotate(explorer, edge)? {
            return Ok(FaceOutcome::Repaired);
        }
    }

    if all_correct {
        debug!("classify_triangle: all sides of {:?} are correct", tri);
        explorer.mark_correct(tri);
        return Ok(FaceOutcome::Certified);
    }
    Ok(FaceOutcome::Deferred)
}

/// Merge the two triangles on either side of `edge` into a quad.
///
/// Fires when one triangle already has two correct edges, or when a correct
/// edge of each triangle meet at a vertex and the correct faces behind them
/// meet at exactly one vertex too.
pub fn try_dissolve(explorer: &mut FaceExplorer<'_>, edge: EdgeId) -> Result<bool, QuadFixError> {
    let Some([t1, t2]) = triangle_pair(explorer.mesh(), edge) else {
        return Ok(false);
    };

    let mut c1 = explorer.correct_edges_of(t1);
    let mut c2 = explorer.correct_edges_of(t2);
    c1.remove(&edge);
    c2.remove(&edge);

    let corroborated = c1.len() == 2 || c2.len() == 2 || aligned_pair(explorer.mesh(), t1, &c1, t2, &c2);
    if !corroborated {
        trace!("try_dissolve: {:?} lacks corroboration", edge);
        return Ok(false);
    }

    explorer.dissolve(edge)?;
    Ok(true)
}

/// Rotate `edge`, which separates a triangle from a quad, across the quad.
///
/// Each diagonal of the quad is a candidate cut. Cutting along it and
/// dissolving `edge` turns the triangle into a quad closed by one side of the
/// old quad (the completing edge) and leaves a triangle on the far side. A
/// cut is accepted when the face behind the completing edge touches exactly
/// one of the triangle's other neighbours, and the new quad ends up with two
/// adjacent correct sides. After rotating, every face on the triangle's
/// first correct edge is marked correct.
pub fn try_rotate(explorer: &mut FaceExplorer<'_>, edge: EdgeId) -> Result<bool, QuadFixError> {
    if explorer.is_correct_edge(edge) {
        trace!("try_rotate: {:?} is already correct", edge);
        return Ok(false);
    }

    let mesh = explorer.mesh();
    let Some((tri, quad)) = triangle_and_quad(mesh, edge) else {
        return Ok(false);
    };
    let Some(middle) = mesh.edge_vertices(edge) else {
        return Ok(false);
    };

    let tc = explorer.correct_edges_of(tri);
    let Some(&tc0) = tc.first() else {
        return Ok(false);
    };
    let qc = explorer.correct_edges_of(quad);
    let mut tri_neighbors = neighbor_faces(mesh, tri);
    tri_neighbors.remove(&quad);

    let corners = mesh.face_vertices(quad);
    let diagonals = [[corners[0], corners[2]], [corners[1], corners[3]]];

    let accepted = diagonals.into_iter().find(|&cut| {
        if mesh.find_edge(cut[0], cut[1]).is_some() {
            trace!("try_rotate: diagonal {:?} already exists", cut);
            return false;
        }
        let Some(completing) = edge_completing_triangle(mesh, quad, cut, middle) else {
            return false;
        };

        if let Some(opp) = opposite_face(mesh, quad, completing) {
            let counts: BTreeSet<usize> = tri_neighbors
                .iter()
                .map(|&n| common_vertex_count(mesh, opp, n))
                .collect();
            if counts != BTreeSet::from([0, 1]) {
                trace!("try_rotate: diagonal {:?} is ambiguous", cut);
                return false;
            }
        }

        tc.len() == 2
            || (common_vertex_count(mesh, tc0, completing) > 0 && qc.contains(&completing))
    });

    let Some(cut) = accepted else {
        return Ok(false);
    };
    rotate(explorer, tri, quad, edge, cut, tc0)?;
    Ok(true)
}

fn rotate(
    explorer: &mut FaceExplorer<'_>,
    tri: FaceId,
    quad: FaceId,
    edge: EdgeId,
    cut: [VertexId; 2],
    anchor: EdgeId,
) -> Result<(), QuadFixError> {
    let degree = explorer.mesh().face_degree(tri);
    if degree != 3 {
        return Err(QuadFixError::InvariantViolation {
            face: tri,
            reason: format!("expected a triangle to rotate, found {} sides", degree),
        });
    }

    let merged = explorer.rotate(quad, edge, cut)?;
    debug!(
        "rotate: moved {:?} across {:?}, new face {:?}",
        tri, quad, merged
    );

    let anchored = explorer.mesh().edge_faces(anchor).to_vec();
    for face in anchored {
        explorer.mark_correct(face);
    }
    Ok(())
}

/// The two triangles bordering `edge`, if that is all it borders.
fn triangle_pair(mesh: &PolyMesh, edge: EdgeId) -> Option<[FaceId; 2]> {
    match *mesh.edge_faces(edge) {
        [a, b] if is_repairable(mesh, a, 3) && is_repairable(mesh, b, 3) => Some([a, b]),
        _ => None,
    }
}

/// The triangle and the quad bordering `edge`, if that is all it borders.
fn triangle_and_quad(mesh: &PolyMesh, edge: EdgeId) -> Option<(FaceId, FaceId)> {
    let [a, b] = *mesh.edge_faces(edge) else {
        trace!("triangle_and_quad: {:?} does not border two faces", edge);
        return None;
    };
    if is_repairable(mesh, a, 3) && is_repairable(mesh, b, 4) {
        Some((a, b))
    } else if is_repairable(mesh, a, 4) && is_repairable(mesh, b, 3) {
        Some((b, a))
    } else {
        None
    }
}

fn is_repairable(mesh: &PolyMesh, face: FaceId, degree: usize) -> bool {
    mesh.face_degree(face) == degree && !mesh.face_touches_non_manifold_edge(face)
}

/// A correct edge of each triangle meeting at one vertex, with the faces
/// behind those edges meeting at one vertex as well.
fn aligned_pair(
    mesh: &PolyMesh,
    t1: FaceId,
    c1: &BTreeSet<EdgeId>,
    t2: FaceId,
    c2: &BTreeSet<EdgeId>,
) -> bool {
    c1.iter().any(|&e1| {
        c2.iter().any(|&e2| {
            if common_vertex_count(mesh, e1, e2) != 1 {
                return false;
            }
            match (opposite_face(mesh, t1, e1), opposite_face(mesh, t2, e2)) {
                (Some(o1), Some(o2)) => common_vertex_count(mesh, o1, o2) == 1,
                _ => false,
            }
        })
    })
}
