//! Selection flags on vertices, edges and faces.

use super::PolyMesh;
use super::types::{EdgeId, FaceId, VertexId};

impl PolyMesh {
    pub fn select_vertex(&mut self, id: VertexId, selected: bool) {
        if let Some(v) = self.vertices.get_mut(id.0 as usize).filter(|v| !v.removed) {
            v.selected = selected;
        }
    }

    pub fn select_edge(&mut self, id: EdgeId, selected: bool) {
        if let Some(e) = self.edges.get_mut(id.0 as usize).filter(|e| !e.removed) {
            e.selected = selected;
        }
    }

    pub fn select_face(&mut self, id: FaceId, selected: bool) {
        if let Some(f) = self.faces.get_mut(id.0 as usize).filter(|f| !f.removed) {
            f.selected = selected;
        }
    }

    pub fn is_vertex_selected(&self, id: VertexId) -> bool {
        self.vertex(id).is_some_and(|v| v.selected)
    }

    pub fn is_edge_selected(&self, id: EdgeId) -> bool {
        self.edge(id).is_some_and(|e| e.selected)
    }

    pub fn is_face_selected(&self, id: FaceId) -> bool {
        self.face(id).is_some_and(|f| f.selected)
    }

    /// Clear the selection flag on every element
    pub fn deselect_all(&mut self) {
        self.vertices.iter_mut().for_each(|v| v.selected = false);
        self.edges.iter_mut().for_each(|e| e.selected = false);
        self.faces.iter_mut().for_each(|f| f.selected = false);
    }

    /// Selected live faces in ascending ID order
    pub fn selected_faces(&self) -> Vec<FaceId> {
        self.faces().filter(|f| f.selected).map(|f| f.id).collect()
    }

    /// Selected live edges in ascending ID order
    pub fn selected_edges(&self) -> Vec<EdgeId> {
        self.edges().filter(|e| e.selected).map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_select_and_deselect() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut mesh = PolyMesh::from_polygons(&positions, &[[0u32, 1, 2]]).unwrap();

        mesh.select_face(FaceId(0), true);
        mesh.select_vertex(VertexId(2), true);
        assert_eq!(mesh.selected_faces(), vec![FaceId(0)]);
        assert!(mesh.is_vertex_selected(VertexId(2)));

        mesh.deselect_all();
        assert!(mesh.selected_faces().is_empty());
        assert!(!mesh.is_vertex_selected(VertexId(2)));
    }

    #[test]
    fn test_selecting_missing_face_is_ignored() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut mesh = PolyMesh::from_polygons(&positions, &[[0u32, 1, 2]]).unwrap();

        mesh.select_face(FaceId(5), true);
        mesh.select_edge(EdgeId(5), true);

        assert!(mesh.selected_faces().is_empty());
        assert!(mesh.selected_edges().is_empty());
    }
}
