//! Error types for the quad repair operators.

use polymesh::{FaceId, MeshError};

/// Errors that abort a repair.
///
/// Unsupported geometry and ambiguous faces are not errors; they are logged
/// and skipped. Only a broken assumption at the moment a repair executes, or
/// a failing mesh primitive, ends up here. Edits committed before the failure
/// stay in place and the mesh remains structurally valid.
#[derive(Debug, thiserror::Error)]
pub enum QuadFixError {
    #[error("Mesh edit failed: {0}")]
    Mesh(#[from] MeshError),
    #[error("Invariant violated at face {face:?}: {reason}")]
    InvariantViolation { face: FaceId, reason: String },
}
