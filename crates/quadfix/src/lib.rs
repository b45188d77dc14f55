//! Quad region growing and triangle repair.
//!
//! This crate cleans up meshes that should be made of quads but carry stray
//! triangles, starting from a selection of faces the user knows are right:
//! - **Explorer**: tracks the correct region and the faces on its border
//! - **Classify**: certifies quads whose correct neighbours corroborate them
//! - **Repair**: dissolves triangle pairs and rotates triangle/quad edges
//! - **Driver**: repeats passes until nothing changes ([`fix_quads`])
//!
//! Two smaller operators share the same mesh queries:
//! [`select_linked_quads`] flood-fills the selection across quads and
//! [`fix_quad_strip`] pairs a selected triangle strip into quads.
//!
//! # Usage
//!
//! ```ignore
//! use quadfix::{fix_quads, FixQuadsConfig};
//!
//! // Select a few faces known to be good quads, then
//! let report = fix_quads(&mut mesh, &FixQuadsConfig::default())?;
//! // The selection now holds every face certified correct
//! ```
//!
//! Repairs only fire when the neighbourhood admits a single answer. Anything
//! ambiguous is left alone, and faces with more than four sides or on a
//! non-manifold edge are skipped with a warning.

pub mod classify;
pub mod driver;
pub mod error;
pub mod explorer;
pub mod linked;
pub mod repair;
pub mod strip;
pub mod topology;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use classify::classify_quad;
pub use driver::{fix_quads, visit_face};
pub use error::QuadFixError;
pub use explorer::FaceExplorer;
pub use linked::select_linked_quads;
pub use repair::{classify_triangle, try_dissolve, try_rotate};
pub use strip::fix_quad_strip;
pub use types::{
    FaceOutcome, FixQuadsConfig, FixQuadsReport, QuadStripConfig, QuadStripReport, RepairStats,
};
