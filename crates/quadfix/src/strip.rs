//! Pairing a selected strip of triangles into quads.

use polymesh::{EdgeId, FaceId, PolyMesh};
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::error::QuadFixError;
use crate::types::{QuadStripConfig, QuadStripReport};

/// Merge a selected strip of faces pairwise, starting from its ends.
///
/// A strip end is a selected face with exactly one selected neighbour. Ends
/// are peeled off together with that neighbour until none is left, then the
/// edges between the pairs are dissolved. The merged faces become the new
/// selection.
pub fn fix_quad_strip(
    mesh: &mut PolyMesh,
    config: &QuadStripConfig,
) -> Result<QuadStripReport, QuadFixError> {
    let mut remaining: BTreeSet<FaceId> = mesh.selected_faces().into_iter().collect();
    mesh.deselect_all();

    let mut middle_edges = Vec::new();
    for _ in 0..config.max_iterations {
        let Some((end, partner, edge)) = find_strip_end(mesh, &remaining) else {
            break;
        };
        remaining.remove(&end);
        remaining.remove(&partner);
        middle_edges.push(edge);
    }

    if !remaining.is_empty() {
        warn!(
            "fix_quad_strip: {} faces left without a partner",
            remaining.len()
        );
    }

    let merged = mesh.dissolve_edges(&middle_edges)?;
    for &face in &merged {
        mesh.select_face(face, true);
    }

    debug!(
        "fix_quad_strip: {} pairs merged into {} faces",
        middle_edges.len(),
        merged.len()
    );
    Ok(QuadStripReport {
        pairs: middle_edges.len(),
        leftover_faces: remaining.len(),
        merged_faces: merged.len(),
    })
}

/// The lowest-ID face of `faces` with exactly one neighbour in `faces`,
/// that neighbour and the edge between them.
fn find_strip_end(mesh: &PolyMesh, faces: &BTreeSet<FaceId>) -> Option<(FaceId, FaceId, EdgeId)> {
    for &face in faces {
        let mut links = Vec::new();
        for &edge in mesh.face_edges(face) {
            for &neighbor in mesh.edge_faces(edge) {
                if neighbor != face && faces.contains(&neighbor) {
                    links.push((neighbor, edge));
                }
            }
        }
        if let [(partner, edge)] = links[..] {
            return Some((face, partner, edge));
        }
    }
    None
}
