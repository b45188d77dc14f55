//! Modification methods for PolyMesh.
//!
//! Every primitive gathers and validates everything it needs before touching
//! the arena, so a returned error leaves the mesh unchanged. Faces consumed by
//! an edit are tombstoned and replaced by faces with fresh IDs.

use std::collections::{HashMap, HashSet};
use tracing::{trace, warn};

use super::types::{EdgeId, FaceId, MeshError, VertexId};
use super::{PolyMesh, edge_key};

/// Result of mesh compaction - maps old IDs to new IDs.
///
/// Edits leave removed elements in the arrays. Compaction drops them and
/// renumbers the survivors contiguously, preserving their relative order.
#[derive(Debug, Default)]
pub struct CompactionMap {
    pub vertex_map: HashMap<VertexId, VertexId>,
    pub edge_map: HashMap<EdgeId, EdgeId>,
    pub face_map: HashMap<FaceId, FaceId>,
}

impl PolyMesh {
    /// Set the position of a vertex
    pub fn set_vertex_position(&mut self, vertex_id: VertexId, position: glam::Vec3) {
        if let Some(v) = self.vertices.get_mut(vertex_id.0 as usize) {
            v.position = position;
        }
    }

    /// Dissolve an edge, merging its two faces into one.
    ///
    /// ```text
    ///     Before:              After:
    ///    C-------B            C-------B
    ///    |     / |            |       |
    ///    |   /   |    ->      |       |
    ///    | /     |            |       |
    ///    A-------D            A-------D
    /// ```
    ///
    /// Returns the merged face. Fails if the edge does not border exactly two
    /// faces or if the merged boundary would visit a vertex twice (the faces
    /// share more than this one edge).
    pub fn dissolve_edge(&mut self, edge_id: EdgeId) -> Result<FaceId, MeshError> {
        // ===== PHASE 1: GATHER (read-only, fail early) =====
        let edge = self.edge(edge_id).ok_or(MeshError::MissingEdge(edge_id))?;
        if edge.faces.len() != 2 {
            return Err(MeshError::NotDissolvable {
                edge: edge_id,
                faces: edge.faces.len(),
            });
        }
        let [u, w] = edge.vertices;
        let (face_a, face_b) = (edge.faces[0], edge.faces[1]);
        if face_a == face_b {
            return Err(MeshError::InvalidTopology(format!(
                "edge {:?} borders face {:?} twice",
                edge_id, face_a
            )));
        }

        // ===== PHASE 2: BUILD MERGED BOUNDARY =====
        let a = self.face_vertices(face_a);
        let b = self.face_vertices(face_b);
        let (p, q) = oriented_pair(a, u, w).ok_or_else(|| {
            MeshError::InvalidTopology(format!("face {:?} does not contain {:?}", face_a, edge_id))
        })?;

        // A from q around to p, then B from p to q without its endpoints.
        let mut merged = rotate_to(a, q);
        let b_path = if follows(b, q, p) {
            rotate_to(b, p)
        } else {
            let mut reversed = b.to_vec();
            reversed.reverse();
            rotate_to(&reversed, p)
        };
        if b_path.first() != Some(&p) || b_path.last() != Some(&q) {
            return Err(MeshError::InvalidTopology(format!(
                "face {:?} does not contain {:?}",
                face_b, edge_id
            )));
        }
        merged.extend_from_slice(&b_path[1..b_path.len() - 1]);

        let mut seen = HashSet::with_capacity(merged.len());
        if let Some(&repeated) = merged.iter().find(|&&v| !seen.insert(v)) {
            return Err(MeshError::InvalidTopology(format!(
                "dissolving {:?} would visit {:?} twice",
                edge_id, repeated
            )));
        }

        // ===== PHASE 3: REWIRE =====
        let selected =
            self.faces[face_a.0 as usize].selected && self.faces[face_b.0 as usize].selected;
        self.retire_face(face_a);
        self.retire_face(face_b);
        self.remove_edge(edge_id);
        let merged_face = self.attach_face(merged, selected);

        trace!(
            "dissolve_edge: merged {:?} and {:?} across {:?} into {:?}",
            face_a, face_b, edge_id, merged_face
        );
        Ok(merged_face)
    }

    /// Dissolve a batch of edges.
    ///
    /// Edges that were already consumed or that do not border exactly two
    /// faces are skipped. Returns the merged faces still alive at the end.
    pub fn dissolve_edges(&mut self, edges: &[EdgeId]) -> Result<Vec<FaceId>, MeshError> {
        let mut merged = Vec::new();
        for &edge in edges {
            match self.dissolve_edge(edge) {
                Ok(face) => merged.push(face),
                Err(MeshError::MissingEdge(_)) => {
                    trace!("dissolve_edges: {:?} already removed, skipping", edge);
                }
                Err(MeshError::NotDissolvable { faces, .. }) => {
                    warn!("dissolve_edges: {:?} borders {} faces, skipping", edge, faces);
                }
                Err(e) => return Err(e),
            }
        }
        merged.retain(|&f| self.is_face_valid(f));
        Ok(merged)
    }

    /// Create an edge between two existing vertices.
    ///
    /// Returns the existing edge if the vertices are already connected. A new
    /// edge starts as a wire edge bordering no faces.
    pub fn create_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId, MeshError> {
        if !self.is_vertex_valid(a) {
            return Err(MeshError::MissingVertex(a));
        }
        if !self.is_vertex_valid(b) {
            return Err(MeshError::MissingVertex(b));
        }
        if a == b {
            return Err(MeshError::InvalidTopology(format!(
                "cannot connect {:?} to itself",
                a
            )));
        }
        Ok(self.ensure_edge(a, b))
    }

    /// Split a face along wire edges whose endpoints lie on it.
    ///
    /// Edges are applied in order, each one splitting whichever piece of the
    /// original face contains both of its endpoints as non-adjacent corners.
    /// Returns the resulting pieces.
    pub fn split_face_by_edges(
        &mut self,
        face_id: FaceId,
        edges: &[EdgeId],
    ) -> Result<Vec<FaceId>, MeshError> {
        if !self.is_face_valid(face_id) {
            return Err(MeshError::MissingFace(face_id));
        }

        let mut pieces = vec![face_id];
        for &edge_id in edges {
            let edge = self.edge(edge_id).ok_or(MeshError::MissingEdge(edge_id))?;
            if !edge.faces.is_empty() {
                return Err(MeshError::InvalidSplit {
                    face: face_id,
                    edge: edge_id,
                });
            }
            let [u, w] = edge.vertices;

            let (index, cut) = pieces
                .iter()
                .enumerate()
                .find_map(|(index, &piece)| {
                    split_loops(self.face_vertices(piece), u, w).map(|cut| (index, cut))
                })
                .ok_or(MeshError::InvalidSplit {
                    face: face_id,
                    edge: edge_id,
                })?;

            let piece = pieces.swap_remove(index);
            let selected = self.faces[piece.0 as usize].selected;
            self.retire_face(piece);
            let (first, second) = cut;
            pieces.push(self.attach_face(first, selected));
            pieces.push(self.attach_face(second, selected));

            trace!(
                "split_face_by_edges: split {:?} along {:?} into {:?}",
                piece,
                edge_id,
                &pieces[pieces.len() - 2..]
            );
        }

        pieces.sort_unstable();
        Ok(pieces)
    }

    /// Remove dead vertices, edges and faces and renumber the survivors.
    ///
    /// Vertices that are still alive are kept even if isolated.
    pub fn compact(&mut self) -> CompactionMap {
        let mut map = CompactionMap::default();
        let mut compacted = PolyMesh::new();

        for v in self.vertices() {
            let new_id = compacted.add_vertex(v.position);
            compacted.vertices[new_id.0 as usize].selected = v.selected;
            map.vertex_map.insert(v.id, new_id);
        }

        for e in self.edges() {
            let new_id = compacted.ensure_edge(
                map.vertex_map[&e.vertices[0]],
                map.vertex_map[&e.vertices[1]],
            );
            compacted.edges[new_id.0 as usize].selected = e.selected;
            map.edge_map.insert(e.id, new_id);
        }

        for f in self.faces() {
            let verts = f.vertices.iter().map(|v| map.vertex_map[v]).collect();
            let new_id = compacted.attach_face(verts, f.selected);
            map.face_map.insert(f.id, new_id);
        }

        tracing::debug!(
            "compact: {} -> {} vertices, {} -> {} edges, {} -> {} faces",
            self.vertices.len(),
            compacted.vertices.len(),
            self.edges.len(),
            compacted.edges.len(),
            self.faces.len(),
            compacted.faces.len()
        );

        *self = compacted;
        map
    }

    /// Tombstone a face and unlink it from its edges.
    pub(crate) fn retire_face(&mut self, face_id: FaceId) {
        let edges = std::mem::take(&mut self.faces[face_id.0 as usize].edges);
        for edge in edges {
            self.edges[edge.0 as usize].faces.retain(|&f| f != face_id);
        }
        let face = &mut self.faces[face_id.0 as usize];
        face.removed = true;
        face.selected = false;
    }

    /// Tombstone an edge and unlink it from its vertices.
    pub(crate) fn remove_edge(&mut self, edge_id: EdgeId) {
        let [a, b] = self.edges[edge_id.0 as usize].vertices;
        self.edge_map.remove(&edge_key(a, b));
        self.vertices[a.0 as usize].edges.retain(|&e| e != edge_id);
        self.vertices[b.0 as usize].edges.retain(|&e| e != edge_id);
        let edge = &mut self.edges[edge_id.0 as usize];
        edge.removed = true;
        edge.selected = false;
        edge.faces.clear();
    }
}

/// Return `(u, w)` or `(w, u)`, whichever appears consecutively in `cycle`.
fn oriented_pair(cycle: &[VertexId], u: VertexId, w: VertexId) -> Option<(VertexId, VertexId)> {
    if follows(cycle, u, w) {
        Some((u, w))
    } else if follows(cycle, w, u) {
        Some((w, u))
    } else {
        None
    }
}

/// Whether `to` comes right after `from` in `cycle`.
fn follows(cycle: &[VertexId], from: VertexId, to: VertexId) -> bool {
    let n = cycle.len();
    cycle
        .iter()
        .position(|&v| v == from)
        .is_some_and(|i| cycle[(i + 1) % n] == to)
}

/// Rotate `cycle` so it starts at `start` (unchanged if absent).
fn rotate_to(cycle: &[VertexId], start: VertexId) -> Vec<VertexId> {
    let mut out = cycle.to_vec();
    if let Some(i) = cycle.iter().position(|&v| v == start) {
        out.rotate_left(i);
    }
    out
}

/// Cut a vertex loop along the chord `u`-`w`.
///
/// Both loops keep the winding of the input. Returns `None` unless both
/// endpoints are corners of the loop and not already neighbours.
fn split_loops(
    cycle: &[VertexId],
    u: VertexId,
    w: VertexId,
) -> Option<(Vec<VertexId>, Vec<VertexId>)> {
    let n = cycle.len();
    let i = cycle.iter().position(|&v| v == u)?;
    let j = cycle.iter().position(|&v| v == w)?;
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    if j - i < 2 || j - i > n - 2 {
        return None;
    }

    let first = cycle[i..=j].to_vec();
    let mut second = cycle[j..].to_vec();
    second.extend_from_slice(&cycle[..=i]);
    Some((first, second))
}
