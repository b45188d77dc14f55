//! Configuration and report types for the quad repair operators.

use serde::{Deserialize, Serialize};

/// Default cap on full region-growing passes
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Default cap on strip pairing iterations
pub const DEFAULT_MAX_STRIP_ITERATIONS: usize = 10_000;

/// Configuration for [`crate::fix_quads`].
///
/// Values are configurable and should not be treated as magic numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixQuadsConfig {
    /// Maximum number of full passes over the region border (default: 10).
    ///
    /// A repair late in one pass can complete the evidence for a face that
    /// was deferred earlier, so passes repeat until nothing changes or this
    /// cap is reached.
    pub max_passes: usize,
}

impl Default for FixQuadsConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Configuration for [`crate::fix_quad_strip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadStripConfig {
    /// Maximum number of triangle pairs to peel off the strip (default: 10000)
    pub max_iterations: usize,
}

impl Default for QuadStripConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_STRIP_ITERATIONS,
        }
    }
}

/// What happened when a face was taken off the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOutcome {
    /// The face was consumed by an earlier repair
    Stale,
    /// The face is already in the correct set
    AlreadyCorrect,
    /// Degree above four or a non-manifold edge; excluded from the run
    Unsupported,
    /// Not enough evidence yet; may be revisited in a later pass
    Deferred,
    /// Marked correct without changing the mesh
    Certified,
    /// A dissolve or rotation changed the mesh
    Repaired,
}

/// Counters collected while the explorer runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairStats {
    /// Faces added to the correct set beyond the seeds
    pub faces_marked: usize,
    /// Triangle pairs merged by dissolving their shared edge
    pub dissolves: usize,
    /// Triangle/quad edge rotations
    pub rotations: usize,
}

impl RepairStats {
    pub fn mutations(&self) -> usize {
        self.dissolves + self.rotations
    }

    pub(crate) fn accumulate(&mut self, other: &RepairStats) {
        self.faces_marked += other.faces_marked;
        self.dissolves += other.dissolves;
        self.rotations += other.rotations;
    }
}

/// Summary of a [`crate::fix_quads`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixQuadsReport {
    /// Passes actually run
    pub passes: usize,
    /// Whether the last pass changed nothing
    pub converged: bool,
    /// Totals across all passes
    pub stats: RepairStats,
    /// Distinct faces excluded as unsupported geometry
    pub unsupported_faces: usize,
    /// Size of the final correct set (written back as the selection)
    pub correct_faces: usize,
}

/// Summary of a [`crate::fix_quad_strip`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuadStripReport {
    /// Face pairs found by peeling the strip from its ends
    pub pairs: usize,
    /// Selected faces left without a partner
    pub leftover_faces: usize,
    /// Faces produced by dissolving the paired edges
    pub merged_faces: usize,
}
