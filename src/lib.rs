// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shade-aware walking routes over [OpenStreetMap](https://www.openstreetmap.org/) data.
//!
//! Every edge of a walking network carries a `shade` measurement (0 = full sun,
//! 255 = full shade). Two routes are computed between a pair of points:
//! the shortest one, minimizing plain length, and the shaded one, where each edge
//! costs its length plus a sun penalty scaled by a tunable `alpha`
//! (see [compute_costs]).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! let mut g = shadowroute::Graph::default();
//! let config = shadowroute::Config::default();
//! let osm_options = shadowroute::osm::Options {
//!     profile: &shadowroute::osm::WALK_PROFILE,
//!     file_format: shadowroute::osm::FileFormat::Unknown,
//!     bbox: Some(config.aoi),
//! };
//! shadowroute::osm::add_features_from_file(&mut g, &osm_options, "path/to/bologna.osm")
//!     .expect("failed to load bologna.osm");
//!
//! let mut session = shadowroute::RoutingSession::new(Arc::new(g), config)
//!     .expect("malformed graph");
//! session.click(shadowroute::Coordinate::new(44.4985, 11.3250)).unwrap();
//! session.click(shadowroute::Coordinate::new(44.5055, 11.3420)).unwrap();
//!
//! let routes = session
//!     .compute(50.0, shadowroute::RouteMode::Both)
//!     .expect("failed to compute routes");
//! println!("Routes: {:?}", routes);
//! ```

pub mod aoi;
mod config;
mod cost;
mod distance;
mod error;
mod graph;
mod kd;
mod locator;
pub mod osm;
mod planner;
pub mod selector;
mod session;

pub use aoi::{BoundingBox, InvalidBoundingBox};
pub use config::{Config, DEFAULT_ALPHA, MAX_ALPHA};
pub use cost::{apply_costs, compute_costs, edge_costs, validate_alpha, CostTable, EdgeCosts};
pub use distance::earth_distance;
pub use error::{Error, GraphIntegrityError, InputRejected};
pub use graph::Graph;
pub use kd::KDTree;
pub use locator::{nearest_node, NodeLocator, Snap, DEFAULT_MAX_DISTANCE};
pub use planner::{plan, shortest_path, Path, PlanError, DEFAULT_STEP_LIMIT};
pub use selector::{Phase, PointSelector};
pub use session::RoutingSession;

/// Identifier of a [Node], unique within a [Graph].
pub type NodeId = i64;

/// Index of an [Edge] in its [Graph].
pub type EdgeId = usize;

/// A latitude-longitude pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Represents an element of the [Graph]: a road network junction or shape point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// Represents a one-way connection between two [Nodes](Node) of a [Graph].
///
/// `length` is in meters, and `shade` is expected in the 0 (full sun) to 255 (full shade)
/// range. Both are optional in the input data; see [edge_costs] for how absent
/// values are interpreted.
///
/// `cost_shortest` and `cost_shaded` are derived state, set by [apply_costs].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,

    /// Disambiguates parallel edges between the same pair of nodes.
    pub key: u32,

    pub length: Option<f64>,
    pub shade: Option<f64>,
    pub cost_shortest: f64,
    pub cost_shaded: f64,
}

/// Which edge cost a shortest-path search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
    /// Plain edge length.
    Shortest,

    /// Edge length plus the sun penalty.
    Shaded,
}

impl Weight {
    pub fn name(self) -> &'static str {
        match self {
            Self::Shortest => "shortest",
            Self::Shaded => "shaded",
        }
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which routes should be computed for a [RouteRequest].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteMode {
    Shortest,
    Shaded,
    #[default]
    Both,
}

impl RouteMode {
    /// Returns the [Weights](Weight) which need a shortest-path search under this mode.
    pub fn weights(self) -> &'static [Weight] {
        match self {
            Self::Shortest => &[Weight::Shortest],
            Self::Shaded => &[Weight::Shaded],
            Self::Both => &[Weight::Shortest, Weight::Shaded],
        }
    }
}

/// Routing query between two already-snapped nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub start: NodeId,
    pub end: NodeId,
    pub alpha: f64,
    pub mode: RouteMode,
}

/// A single computed route.
///
/// An empty `nodes` vector means no route exists between the requested nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub weight: Weight,
    pub nodes: Vec<NodeId>,
    pub coordinates: Vec<Coordinate>,

    /// Sum of `cost_shortest` over the traversed edges, in meters.
    pub total_length: f64,

    /// Sum of `cost_shaded` over the traversed edges.
    pub total_shaded: f64,
}

impl Route {
    /// Creates an empty route, signalling that the end node can't be reached.
    pub fn unreachable(weight: Weight) -> Self {
        Self {
            weight,
            nodes: Vec::default(),
            coordinates: Vec::default(),
            total_length: 0.0,
            total_shaded: 0.0,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the total cost of the route, as measured by its own [Weight].
    pub fn total_cost(&self) -> f64 {
        self.total(self.weight)
    }

    /// Returns the total cost of the route, as measured by any [Weight].
    pub fn total(&self, weight: Weight) -> f64 {
        match weight {
            Weight::Shortest => self.total_length,
            Weight::Shaded => self.total_shaded,
        }
    }
}

/// Routes computed for a [RouteRequest]. A route is present if and only if
/// its [Weight] was requested by the [RouteMode].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub alpha: f64,
    pub shortest: Option<Route>,
    pub shaded: Option<Route>,
}

impl RouteResult {
    pub fn get(&self, weight: Weight) -> Option<&Route> {
        match weight {
            Weight::Shortest => self.shortest.as_ref(),
            Weight::Shaded => self.shaded.as_ref(),
        }
    }

    /// Iterates over all computed routes, shortest first.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.shortest.iter().chain(self.shaded.iter())
    }
}
