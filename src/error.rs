// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{NodeId, PlanError};

/// Recoverable, user-facing rejection of a routing input.
///
/// Nothing is modified when an input is rejected; the user may simply retry.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InputRejected {
    #[error("point ({lat}, {lon}) is outside of the area of interest")]
    OutsideAoi { lat: f64, lon: f64 },

    #[error("point ({lat}, {lon}) is {distance:.0} m from the nearest road (max {max_distance:.0} m)")]
    TooFarFromRoad {
        lat: f64,
        lon: f64,
        distance: f64,
        max_distance: f64,
    },

    #[error("start point is not selected")]
    MissingStart,

    #[error("end point is not selected")]
    MissingEnd,

    #[error("invalid alpha: {0} (must be a finite, non-negative number)")]
    InvalidAlpha(f64),
}

/// Malformed [Graph](crate::Graph). Indicates a defect in the data loading,
/// not something the user can fix by retrying.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GraphIntegrityError {
    #[error("edge {from} -> {to} references an unknown node")]
    DanglingEdge { from: NodeId, to: NodeId },

    #[error("edge {from} -> {to} (key {key}) does not exist")]
    UnknownEdge { from: NodeId, to: NodeId, key: u32 },

    #[error("edge {from} -> {to} has an invalid length: {length}")]
    InvalidLength { from: NodeId, to: NodeId, length: f64 },

    #[error("edge {from} -> {to} has an invalid cost: {cost}")]
    InvalidCost { from: NodeId, to: NodeId, cost: f64 },
}

/// Any error which can occur when computing routes in a [RoutingSession](crate::RoutingSession).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Rejected(#[from] InputRejected),

    #[error("graph integrity: {0}")]
    GraphIntegrity(#[from] GraphIntegrityError),

    #[error("route search: {0}")]
    Plan(#[from] PlanError),
}

impl Error {
    /// Returns true if the error was caused by user input, and should be presented
    /// as a warning rather than a failure.
    pub fn is_input_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
