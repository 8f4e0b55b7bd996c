// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use crate::{CostTable, EdgeId, Graph, NodeId, PlanError, Weight};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: NodeId,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost).is_eq()
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.cost.total_cmp(&self.cost)
    }
}

/// A minimum-cost sequence of nodes, together with the exact edges traversed
/// (relevant for parallel edges) and the total cost.
///
/// Empty `nodes` mean there is no path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    pub cost: f64,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn reconstruct_path(
    g: &Graph,
    came_from: &HashMap<NodeId, EdgeId>,
    mut last: NodeId,
    cost: f64,
) -> Path {
    let mut nodes = vec![last];
    let mut edges = Vec::default();

    // A simple path never has more edges than the graph has nodes
    for _ in 0..g.len() {
        let Some(&edge_id) = came_from.get(&last) else {
            break;
        };
        let from = g.edges()[edge_id].from;
        nodes.push(from);
        edges.push(edge_id);
        last = from;
    }

    nodes.reverse();
    edges.reverse();
    Path { nodes, edges, cost }
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find a minimum-cost route between two nodes, as measured by the given [Weight]
/// from the [CostTable].
///
/// Costs must be non-negative. Returns an empty [Path] if there is no route between
/// the two nodes. If multiple routes have the same minimal cost, any of them may be returned.
///
/// `step_limit` limits how many nodes may be expanded during the search
/// before returning [PlanError::StepLimitExceeded]. The recommended value is
/// [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn shortest_path(
    g: &Graph,
    costs: &CostTable,
    weight: Weight,
    from_id: NodeId,
    to_id: NodeId,
    step_limit: usize,
) -> Result<Path, PlanError> {
    g.get_node(from_id)
        .ok_or(PlanError::InvalidReference(from_id))?;
    g.get_node(to_id).ok_or(PlanError::InvalidReference(to_id))?;

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<NodeId, EdgeId> = HashMap::default();
    let mut known_costs: HashMap<NodeId, f64> = HashMap::default();
    let mut steps: usize = 0;

    queue.push(QueueItem {
        at: from_id,
        cost: 0.0,
    });
    known_costs.insert(from_id, 0.0);

    while let Some(item) = queue.pop() {
        if item.at == to_id {
            return Ok(reconstruct_path(g, &came_from, to_id, item.cost));
        }

        // Multiple items may be kept in the queue for the same node; skip the outdated ones.
        if item.cost > known_costs.get(&item.at).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        steps += 1;
        if steps > step_limit {
            return Err(PlanError::StepLimitExceeded);
        }

        for &edge_id in g.outgoing(item.at) {
            let neighbor_id = g.edges()[edge_id].to;
            let edge_cost = costs.get(edge_id, weight);
            debug_assert!(edge_cost >= 0.0, "negative edge cost: {edge_cost}");

            // Check if this is the cheapest way to the neighbor
            let neighbor_cost = item.cost + edge_cost;
            if neighbor_cost
                >= known_costs
                    .get(&neighbor_id)
                    .copied()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            came_from.insert(neighbor_id, edge_id);
            known_costs.insert(neighbor_id, neighbor_cost);
            queue.push(QueueItem {
                at: neighbor_id,
                cost: neighbor_cost,
            });
        }
    }

    Ok(Path::default())
}
