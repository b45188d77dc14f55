//! Bevy export for PolyMesh.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use super::PolyMesh;

impl PolyMesh {
    /// Convert to a renderable Bevy mesh
    ///
    /// Each live face is fan-triangulated with its own copy of its corners so
    /// faces keep flat normals.
    pub fn to_bevy_mesh(&self) -> Mesh {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();

        for face in self.faces() {
            let corners: Vec<[f32; 3]> = face
                .vertices()
                .iter()
                .filter_map(|&v| self.vertex(v).map(|v| v.position.to_array()))
                .collect();
            if corners.len() < 3 {
                continue;
            }

            let p0 = Vec3::from_array(corners[0]);
            let p1 = Vec3::from_array(corners[1]);
            let p2 = Vec3::from_array(corners[2]);
            let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero().to_array();

            let base_idx = positions.len() as u32;
            for corner in &corners {
                positions.push(*corner);
                normals.push(normal);
            }

            // Fan triangulation
            for i in 1..(corners.len() - 1) {
                indices.push(base_idx);
                indices.push(base_idx + i as u32);
                indices.push(base_idx + i as u32 + 1);
            }
        }

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_indices(Indices::U32(indices));
        mesh
    }
}
