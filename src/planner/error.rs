// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::NodeId;

/// Recommended number of allowed node expansions in [shortest_path](crate::shortest_path)
/// and [plan](crate::plan) before [PlanError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur during [shortest_path](crate::shortest_path)
/// or [plan](crate::plan).
///
/// Note that a missing route is not an error - it is signalled by an empty path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The start or end nodes don't exist in a graph.
    #[error("invalid node: {0}")]
    InvalidReference(NodeId),

    /// Route search has exceeded its limit of steps.
    ///
    /// Concluding that no route exists requires traversing the whole reachable graph.
    /// The step limit protects against resource exhaustion on unexpectedly large inputs.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}
