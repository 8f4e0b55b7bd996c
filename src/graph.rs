// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};

use crate::{earth_distance, Coordinate, Edge, EdgeId, GraphIntegrityError, Node, NodeId};

/// Represents a walking network as a set of [Nodes](Node)
/// and directed [Edges](Edge) between them.
///
/// Once loaded, the topology is treated as immutable - only the derived cost
/// fields of edges may change (see [Graph::set_edge_costs]).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    nodes: BTreeMap<NodeId, (Node, Vec<EdgeId>)>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of (directed) edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().map(|(node, _)| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: NodeId) -> Option<Node> {
        self.nodes.get(&id).map(|&(node, _)| node)
    }

    /// Retrieves the position of a [Node] with the provided id.
    pub fn coordinate(&self, id: NodeId) -> Option<Coordinate> {
        self.get_node(id).map(|n| n.coordinate())
    }

    /// Creates or updates a [Node] with `node.id`.
    ///
    /// All outgoing and incoming edges are preserved, but their lengths are not
    /// recomputed - moving nodes of a loaded graph is therefore discouraged.
    pub fn set_node(&mut self, node: Node) {
        match self.nodes.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert((node, Vec::default()));
            }
            Entry::Occupied(mut e) => {
                debug_assert_eq!(e.get().0.id, node.id);
                e.get_mut().0 = node;
            }
        }
    }

    /// Deletes a [Node] without any edges. Used only while building a graph,
    /// as removing a node with incoming edges would leave them dangling.
    pub(crate) fn delete_unconnected_node(&mut self, id: NodeId) {
        if let Entry::Occupied(e) = self.nodes.entry(id) {
            debug_assert!(e.get().1.is_empty());
            e.remove();
        }
    }

    /// Returns all [Edges](Edge) of the graph, indexed by [EdgeId].
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Retrieves an [Edge] by its index.
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Gets the indices of all outgoing [Edges](Edge) from a node with a given id.
    pub fn outgoing(&self, from_id: NodeId) -> &[EdgeId] {
        self.nodes
            .get(&from_id)
            .map(|(_, e)| e.as_slice())
            .unwrap_or_default()
    }

    /// Finds the index of an [Edge] identified by its endpoints and key.
    pub fn find_edge(&self, from_id: NodeId, to_id: NodeId, key: u32) -> Option<EdgeId> {
        self.outgoing(from_id).iter().copied().find(|&idx| {
            let e = &self.edges[idx];
            e.to == to_id && e.key == key
        })
    }

    /// Adds a new directed [Edge] between two existing nodes, assigning it the next
    /// free key among the parallel edges from `from_id` to `to_id`.
    ///
    /// Derived costs are initialized as if `alpha` was zero.
    pub fn add_edge(
        &mut self,
        from_id: NodeId,
        to_id: NodeId,
        length: Option<f64>,
        shade: Option<f64>,
    ) -> Result<EdgeId, GraphIntegrityError> {
        if let Some(length) = length {
            if !length.is_finite() || length < 0.0 {
                return Err(GraphIntegrityError::InvalidLength {
                    from: from_id,
                    to: to_id,
                    length,
                });
            }
        }

        if !self.nodes.contains_key(&to_id) {
            return Err(GraphIntegrityError::DanglingEdge {
                from: from_id,
                to: to_id,
            });
        }

        let key = self
            .outgoing(from_id)
            .iter()
            .filter(|&&idx| self.edges[idx].to == to_id)
            .count() as u32;

        let idx = self.edges.len();
        let (_, outgoing) =
            self.nodes
                .get_mut(&from_id)
                .ok_or(GraphIntegrityError::DanglingEdge {
                    from: from_id,
                    to: to_id,
                })?;
        outgoing.push(idx);

        let mut edge = Edge {
            from: from_id,
            to: to_id,
            key,
            length,
            shade,
            cost_shortest: 0.0,
            cost_shaded: 0.0,
        };
        let costs = crate::edge_costs(&edge, 0.0);
        edge.cost_shortest = costs.shortest;
        edge.cost_shaded = costs.shaded;
        self.edges.push(edge);

        Ok(idx)
    }

    /// Adds a pair of opposite [Edges](Edge) with the same attributes.
    pub fn add_undirected_edge(
        &mut self,
        a_id: NodeId,
        b_id: NodeId,
        length: Option<f64>,
        shade: Option<f64>,
    ) -> Result<(EdgeId, EdgeId), GraphIntegrityError> {
        // b_id is checked by the first add_edge, before anything is modified
        if !self.nodes.contains_key(&a_id) {
            return Err(GraphIntegrityError::DanglingEdge {
                from: b_id,
                to: a_id,
            });
        }
        let forward = self.add_edge(a_id, b_id, length, shade)?;
        let backward = self.add_edge(b_id, a_id, length, shade)?;
        Ok((forward, backward))
    }

    /// Updates the derived costs of an [Edge]. The topology is never altered.
    ///
    /// Costs must be non-negative, otherwise the edge is left untouched.
    pub fn set_edge_costs(
        &mut self,
        from_id: NodeId,
        to_id: NodeId,
        key: u32,
        cost_shortest: f64,
        cost_shaded: f64,
    ) -> Result<(), GraphIntegrityError> {
        for cost in [cost_shortest, cost_shaded] {
            if cost.is_nan() || cost < 0.0 {
                return Err(GraphIntegrityError::InvalidCost {
                    from: from_id,
                    to: to_id,
                    cost,
                });
            }
        }

        let idx = self
            .find_edge(from_id, to_id, key)
            .ok_or(GraphIntegrityError::UnknownEdge {
                from: from_id,
                to: to_id,
                key,
            })?;
        let edge = &mut self.edges[idx];
        edge.cost_shortest = cost_shortest;
        edge.cost_shaded = cost_shaded;
        Ok(())
    }

    /// Checks that every edge references existing nodes and has a valid length.
    pub fn validate(&self) -> Result<(), GraphIntegrityError> {
        for e in &self.edges {
            if !self.nodes.contains_key(&e.from) || !self.nodes.contains_key(&e.to) {
                return Err(GraphIntegrityError::DanglingEdge {
                    from: e.from,
                    to: e.to,
                });
            }
            if let Some(length) = e.length {
                if !length.is_finite() || length < 0.0 {
                    return Err(GraphIntegrityError::InvalidLength {
                        from: e.from,
                        to: e.to,
                        length,
                    });
                }
            }
        }
        Ok(())
    }

    /// Finds the closest [Node] to the given position, together with its distance in meters.
    ///
    /// This function requires computing the distance to every [Node] in the graph,
    /// and is not suitable for large graphs - see [NodeLocator](crate::NodeLocator).
    pub fn find_nearest_node(&self, lat: f64, lon: f64) -> Option<(Node, f64)> {
        self.iter()
            .map(|&nd| (nd, earth_distance(lat, lon, nd.lat, nd.lon)))
            .min_by(|(_, a_dist), (_, b_dist)| a_dist.total_cmp(b_dist))
    }
}
