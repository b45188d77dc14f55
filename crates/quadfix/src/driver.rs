//! Multi-pass driver for [`fix_quads`].

use polymesh::{FaceId, PolyMesh};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::classify::classify_quad;
use crate::error::QuadFixError;
use crate::explorer::FaceExplorer;
use crate::repair::classify_triangle;
use crate::types::{FaceOutcome, FixQuadsConfig, FixQuadsReport};

/// Classify one face popped off the frontier.
pub fn visit_face(
    explorer: &mut FaceExplorer<'_>,
    face: FaceId,
) -> Result<FaceOutcome, QuadFixError> {
    let mesh = explorer.mesh();
    if !mesh.is_face_valid(face) {
        return Ok(FaceOutcome::Stale);
    }
    if explorer.is_correct(face) {
        return Ok(FaceOutcome::AlreadyCorrect);
    }

    let degree = mesh.face_degree(face);
    if degree > 4 {
        warn!("visit_face: skipping {:?} with {} sides", face, degree);
        return Ok(FaceOutcome::Unsupported);
    }
    if mesh.face_touches_non_manifold_edge(face) {
        warn!("visit_face: skipping {:?} on a non-manifold edge", face);
        return Ok(FaceOutcome::Unsupported);
    }

    match degree {
        4 if classify_quad(explorer, face) => Ok(FaceOutcome::Certified),
        4 => Ok(FaceOutcome::Deferred),
        _ => classify_triangle(explorer, face),
    }
}

/// Grow the selected region of correct quads, repairing triangles on its
/// border along the way.
///
/// Each pass reseeds a fresh explorer with the correct faces of the previous
/// pass, so faces deferred earlier get another look once a later repair has
/// supplied the missing evidence. Passes stop once one changes nothing, or at
/// `config.max_passes`. On success the face selection is replaced by the
/// correct faces.
///
/// An invariant violation aborts the run. Edits made before it are kept and
/// the selection is left untouched.
pub fn fix_quads(
    mesh: &mut PolyMesh,
    config: &FixQuadsConfig,
) -> Result<FixQuadsReport, QuadFixError> {
    let mut correct: BTreeSet<FaceId> = mesh.selected_faces().into_iter().collect();
    let mut unsupported: BTreeSet<FaceId> = BTreeSet::new();
    let mut report = FixQuadsReport::default();
    debug!("fix_quads: starting from {} selected faces", correct.len());

    for pass in 0..config.max_passes {
        let mut explorer = FaceExplorer::new(mesh, correct.iter().copied());
        run_pass(&mut explorer, &mut unsupported)?;

        let dirty = explorer.is_dirty();
        let stats = explorer.stats();
        correct = explorer.into_correct_faces();
        report.passes += 1;
        report.stats.accumulate(&stats);

        info!(
            "fix_quads: pass {} marked {} faces, {} dissolves, {} rotations ({} correct)",
            pass,
            stats.faces_marked,
            stats.dissolves,
            stats.rotations,
            correct.len()
        );

        if !dirty {
            report.converged = true;
            break;
        }
    }

    if !report.converged {
        warn!(
            "fix_quads: still changing after {} passes, stopping",
            report.passes
        );
    }

    mesh.deselect_all();
    for &face in &correct {
        mesh.select_face(face, true);
    }

    report.unsupported_faces = unsupported.len();
    report.correct_faces = correct.len();
    Ok(report)
}

fn run_pass(
    explorer: &mut FaceExplorer<'_>,
    unsupported: &mut BTreeSet<FaceId>,
) -> Result<(), QuadFixError> {
    while let Some(face) = explorer.pop_frontier() {
        if unsupported.contains(&face) {
            continue;
        }
        if visit_face(explorer, face)? == FaceOutcome::Unsupported {
            unsupported.insert(face);
        }
    }
    Ok(())
}
