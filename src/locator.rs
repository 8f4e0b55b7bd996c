// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Graph, KDTree, Node, NodeId};

/// Default limit on how far (in meters) a point may be snapped to the road network.
pub const DEFAULT_MAX_DISTANCE: f64 = 300.0;

/// Outcome of snapping a position to the nearest [Node].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Snap {
    /// The nearest node is within the allowed distance.
    Found { node: NodeId, distance: f64 },

    /// The nearest node is further than the allowed distance.
    /// `distance` is infinite if the graph has no nodes.
    NotFound { distance: f64 },
}

impl Snap {
    fn gate(nearest: Option<(Node, f64)>, max_distance: f64) -> Self {
        match nearest {
            Some((node, distance)) if distance <= max_distance => Snap::Found {
                node: node.id,
                distance,
            },
            Some((_, distance)) => Snap::NotFound { distance },
            None => Snap::NotFound {
                distance: f64::INFINITY,
            },
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Snap::Found { node, .. } => Some(node),
            Snap::NotFound { .. } => None,
        }
    }

    pub fn distance(&self) -> f64 {
        match *self {
            Snap::Found { distance, .. } | Snap::NotFound { distance } => distance,
        }
    }
}

/// Snaps a position to the closest [Node] of the graph, unless that node is further
/// than `max_distance` meters away. A click far from any road must not be snapped
/// to a distant node.
///
/// If multiple nodes are equally close, any of them may be returned.
///
/// Scans all nodes of the graph; use a [NodeLocator] for repeated lookups.
pub fn nearest_node(g: &Graph, lat: f64, lon: f64, max_distance: f64) -> Snap {
    Snap::gate(g.find_nearest_node(lat, lon), max_distance)
}

/// Repeated, distance-gated nearest-node lookups backed by a [KDTree].
#[derive(Debug, Clone)]
pub struct NodeLocator {
    tree: Option<KDTree>,
    max_distance: f64,
}

impl NodeLocator {
    pub fn new(g: &Graph, max_distance: f64) -> Self {
        Self {
            tree: KDTree::from_nodes(g.iter().copied()),
            max_distance,
        }
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Same as [nearest_node], using the locator's `max_distance`.
    pub fn locate(&self, lat: f64, lon: f64) -> Snap {
        let nearest = self
            .tree
            .as_ref()
            .map(|tree| tree.find_nearest_node(lat, lon));
        Snap::gate(nearest, self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earth_distance;

    fn sample_graph() -> Graph {
        let mut g = Graph::new();
        g.set_node(Node {
            id: 1,
            lat: 44.4990,
            lon: 11.3250,
        });
        g.set_node(Node {
            id: 2,
            lat: 44.5000,
            lon: 11.3300,
        });
        g.set_node(Node {
            id: 3,
            lat: 44.5050,
            lon: 11.3400,
        });
        g.set_node(Node {
            id: 4,
            lat: 44.5060,
            lon: 11.3410,
        });
        g
    }

    #[test]
    fn own_coordinate_is_found() {
        let g = sample_graph();
        let locator = NodeLocator::new(&g, 1.0);
        for n in g.iter() {
            assert_eq!(
                nearest_node(&g, n.lat, n.lon, 1e-6),
                Snap::Found {
                    node: n.id,
                    distance: 0.0,
                }
            );
            assert_eq!(locator.locate(n.lat, n.lon).node(), Some(n.id));
        }
    }

    #[test]
    fn nearby_point_snaps() {
        let g = sample_graph();
        let snap = nearest_node(&g, 44.5001, 11.3302, DEFAULT_MAX_DISTANCE);
        assert_eq!(snap.node(), Some(2));
        assert!(snap.distance() < 30.0);
    }

    #[test]
    fn far_point_is_not_found() {
        let g = sample_graph();

        // Roughly 1000 m south of the southernmost node
        let lat = 44.4990 - 0.009;
        let lon = 11.3250;
        assert!(earth_distance(lat, lon, 44.4990, 11.3250) > 990.0);

        let snap = nearest_node(&g, lat, lon, DEFAULT_MAX_DISTANCE);
        assert!(matches!(snap, Snap::NotFound { distance } if distance > 990.0));
        assert_eq!(snap.node(), None);

        let locator = NodeLocator::new(&g, DEFAULT_MAX_DISTANCE);
        assert_eq!(locator.locate(lat, lon), snap);
    }

    #[test]
    fn empty_graph() {
        let g = Graph::new();
        assert_eq!(
            nearest_node(&g, 44.5, 11.33, DEFAULT_MAX_DISTANCE),
            Snap::NotFound { distance: f64::INFINITY }
        );
        assert_eq!(
            NodeLocator::new(&g, DEFAULT_MAX_DISTANCE).locate(44.5, 11.33),
            Snap::NotFound { distance: f64::INFINITY }
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_locator_agrees_with_scan(
                lat in 44.490..44.512f64,
                lon in 11.315..11.350f64,
                max_distance in 1.0..2_000.0f64,
            ) {
                let g = sample_graph();
                let scan = nearest_node(&g, lat, lon, max_distance);
                let tree = NodeLocator::new(&g, max_distance).locate(lat, lon);
                prop_assert!((scan.distance() - tree.distance()).abs() < 1e-6);
                prop_assert_eq!(scan.node().is_some(), tree.node().is_some());
                prop_assert_eq!(scan.node().is_some(), scan.distance() <= max_distance);
            }
        }
    }
}
