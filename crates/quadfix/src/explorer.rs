//! Correct-region tracking.
//!
//! The explorer owns the mutable borrow of the mesh for the duration of a
//! pass and is the only place the correct sets grow. It is the context value
//! the classifiers and repairs are threaded through.
//!
//! ## Invariants
//!
//! - `correct_faces` only grows.
//! - `correct_edges` is exactly the union of the edges of `correct_faces`.
//!   Repairs only ever consume faces that are not correct, so edges of
//!   correct faces are never removed from the mesh.
//! - The frontier may hold duplicates, correct faces and faces consumed by a
//!   repair; consumers filter on pop.

use polymesh::{EdgeId, FaceId, PolyMesh, VertexId};
use std::collections::{BTreeSet, VecDeque};
use tracing::trace;

use crate::error::QuadFixError;
use crate::topology::neighbor_faces;
use crate::types::RepairStats;

/// Region-growing state over one mesh.
#[derive(Debug)]
pub struct FaceExplorer<'m> {
    mesh: &'m mut PolyMesh,
    correct_faces: BTreeSet<FaceId>,
    correct_edges: BTreeSet<EdgeId>,
    frontier: VecDeque<FaceId>,
    /// Set when the pass certifies a face beyond its seeds or edits the mesh
    dirty: bool,
    stats: RepairStats,
}

impl<'m> FaceExplorer<'m> {
    /// Seed the correct region. Seeding alone does not mark the pass dirty.
    pub fn new(mesh: &'m mut PolyMesh, seeds: impl IntoIterator<Item = FaceId>) -> Self {
        let mut explorer = Self {
            mesh,
            correct_faces: BTreeSet::new(),
            correct_edges: BTreeSet::new(),
            frontier: VecDeque::new(),
            dirty: false,
            stats: RepairStats::default(),
        };
        for face in seeds {
            explorer.mark_correct(face);
        }
        explorer.dirty = false;
        explorer.stats = RepairStats::default();
        explorer
    }

    pub fn mesh(&self) -> &PolyMesh {
        self.mesh
    }

    /// Add a face to the correct region and queue its unresolved neighbours.
    ///
    /// Returns `false` if the face was already correct or no longer exists.
    pub fn mark_correct(&mut self, face: FaceId) -> bool {
        if self.correct_faces.contains(&face) {
            return false;
        }
        if !self.mesh.is_face_valid(face) {
            trace!("mark_correct: {:?} no longer exists", face);
            return false;
        }

        self.dirty = true;
        self.stats.faces_marked += 1;
        self.correct_faces.insert(face);
        self.correct_edges
            .extend(self.mesh.face_edges(face).iter().copied());
        for neighbor in neighbor_faces(self.mesh, face) {
            if !self.correct_faces.contains(&neighbor) {
                self.frontier.push_back(neighbor);
            }
        }
        trace!("mark_correct: {:?} (region size {})", face, self.correct_faces.len());
        true
    }

    pub fn is_correct(&self, face: FaceId) -> bool {
        self.correct_faces.contains(&face)
    }

    /// Whether some face bordering `edge` is correct.
    pub fn is_correct_edge(&self, edge: EdgeId) -> bool {
        self.mesh
            .edge_faces(edge)
            .iter()
            .any(|f| self.correct_faces.contains(f))
    }

    /// The correct edges of `face`, lowest ID first.
    pub fn correct_edges_of(&self, face: FaceId) -> BTreeSet<EdgeId> {
        self.mesh
            .face_edges(face)
            .iter()
            .copied()
            .filter(|e| self.correct_edges.contains(e))
            .collect()
    }

    /// The correct faces among `faces`, lowest ID first.
    pub fn correct_among(&self, faces: &BTreeSet<FaceId>) -> BTreeSet<FaceId> {
        faces.intersection(&self.correct_faces).copied().collect()
    }

    /// Dissolve `edge`, merging its two faces.
    ///
    /// The merged face is not certified here; it is picked up again once a
    /// neighbour is marked correct.
    pub fn dissolve(&mut self, edge: EdgeId) -> Result<FaceId, QuadFixError> {
        let merged = self.merge(edge)?;
        self.stats.dissolves += 1;
        trace!("dissolve: {:?} merged into {:?}", edge, merged);
        Ok(merged)
    }

    /// Cut `quad` along `cut` and dissolve `middle`, one of its sides.
    ///
    /// The face across `middle` absorbs the half of the quad next to it.
    /// Returns that merged face.
    pub(crate) fn rotate(
        &mut self,
        quad: FaceId,
        middle: EdgeId,
        cut: [VertexId; 2],
    ) -> Result<FaceId, QuadFixError> {
        let degree = self.mesh.face_degree(quad);
        if degree != 4 {
            return Err(QuadFixError::InvariantViolation {
                face: quad,
                reason: format!("expected a quad to rotate across, found {} sides", degree),
            });
        }
        if !self.mesh.face_edges(quad).contains(&middle) {
            return Err(QuadFixError::InvariantViolation {
                face: quad,
                reason: format!("{:?} is not a side of the quad", middle),
            });
        }

        let new_edge = self.mesh.create_edge(cut[0], cut[1])?;
        self.mesh.split_face_by_edges(quad, &[new_edge])?;
        let merged = self.merge(middle)?;
        self.stats.rotations += 1;
        trace!(
            "rotate: replaced {:?} with {:?}, merged into {:?}",
            middle, new_edge, merged
        );
        Ok(merged)
    }

    fn merge(&mut self, edge: EdgeId) -> Result<FaceId, QuadFixError> {
        let correct_side = self
            .mesh
            .edge_faces(edge)
            .iter()
            .copied()
            .find(|f| self.correct_faces.contains(f));
        if let Some(face) = correct_side {
            return Err(QuadFixError::InvariantViolation {
                face,
                reason: format!("refusing to dissolve correct edge {:?}", edge),
            });
        }

        let merged = self.mesh.dissolve_edge(edge)?;
        self.dirty = true;
        Ok(merged)
    }

    /// Next queued face, in FIFO order.
    pub fn pop_frontier(&mut self) -> Option<FaceId> {
        self.frontier.pop_front()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn stats(&self) -> RepairStats {
        self.stats
    }

    pub fn correct_faces(&self) -> &BTreeSet<FaceId> {
        &self.correct_faces
    }

    pub fn correct_edges(&self) -> &BTreeSet<EdgeId> {
        &self.correct_edges
    }

    /// Finish the pass, returning the correct faces that still exist.
    pub fn into_correct_faces(self) -> BTreeSet<FaceId> {
        let mesh = self.mesh;
        self.correct_faces
            .into_iter()
            .filter(|&f| mesh.is_face_valid(f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{cell, grid_mesh};

    fn edge_union(explorer: &FaceExplorer<'_>) -> BTreeSet<EdgeId> {
        explorer
            .correct_faces()
            .iter()
            .flat_map(|&f| explorer.mesh().face_edges(f).iter().copied())
            .collect()
    }

    #[test]
    fn test_seeding_queues_neighbors_and_stays_clean() {
        let mut mesh = grid_mesh(3, 1, &[], &[]);
        let left = cell(&mesh, 3, 0, 0);
        let middle = cell(&mesh, 3, 1, 0);

        let mut explorer = FaceExplorer::new(&mut mesh, [left]);

        assert!(!explorer.is_dirty());
        assert_eq!(explorer.stats(), RepairStats::default());
        assert_eq!(explorer.pop_frontier(), Some(middle));
        assert_eq!(explorer.pop_frontier(), None);
    }

    #[test]
    fn test_mark_correct_is_idempotent() {
        let mut mesh = grid_mesh(2, 1, &[], &[]);
        let left = cell(&mesh, 2, 0, 0);
        let right = cell(&mesh, 2, 1, 0);
        let mut explorer = FaceExplorer::new(&mut mesh, [left]);

        assert!(explorer.mark_correct(right));
        assert!(!explorer.mark_correct(right));
        assert!(explorer.is_dirty());
        assert_eq!(explorer.stats().faces_marked, 1);
    }

    #[test]
    fn test_region_is_monotonic_and_edges_track_faces() {
        let mut mesh = grid_mesh(3, 3, &[], &[]);
        let order: Vec<FaceId> = [(1, 1), (0, 0), (2, 2), (1, 1), (2, 0)]
            .into_iter()
            .map(|(x, y)| cell(&mesh, 3, x, y))
            .collect();
        let mut explorer = FaceExplorer::new(&mut mesh, Vec::<FaceId>::new());

        let mut previous = 0;
        for face in order {
            explorer.mark_correct(face);
            let size = explorer.correct_faces().len();
            assert!(size >= previous);
            previous = size;
            assert_eq!(explorer.correct_edges(), &edge_union(&explorer));
        }
        assert_eq!(previous, 4);
    }

    #[test]
    fn test_correct_edge_queries() {
        let mut mesh = grid_mesh(2, 1, &[], &[]);
        let left = cell(&mesh, 2, 0, 0);
        let right = cell(&mesh, 2, 1, 0);
        let explorer = FaceExplorer::new(&mut mesh, [left]);

        let right_edges = explorer.mesh().face_edges(right).to_vec();
        let correct: Vec<EdgeId> = right_edges
            .iter()
            .copied()
            .filter(|&e| explorer.is_correct_edge(e))
            .collect();

        // Only the shared side of the right cell touches the region
        assert_eq!(correct.len(), 1);
        assert_eq!(
            explorer.correct_edges_of(right),
            correct.into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_dissolve_refuses_correct_edge() {
        let mut mesh = grid_mesh(2, 1, &[], &[]);
        let left = cell(&mesh, 2, 0, 0);
        let mut explorer = FaceExplorer::new(&mut mesh, [left]);
        let shared = explorer.correct_edges().iter().copied().find(|&e| {
            explorer.mesh().edge_faces(e).len() == 2
        });

        let result = explorer.dissolve(shared.unwrap());

        assert!(matches!(result, Err(QuadFixError::InvariantViolation { .. })));
        assert_eq!(explorer.mesh().face_count(), 2);
    }
}
