// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Edge, EdgeId, Error, Graph, InputRejected, Weight};

/// Shade value of a fully shaded edge.
pub const MAX_SHADE: f64 = 255.0;

/// Length assumed for edges without a `length` attribute.
pub const DEFAULT_LENGTH: f64 = 1.0;

/// Pair of weights derived for a single [Edge].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCosts {
    pub shortest: f64,
    pub shaded: f64,
}

impl EdgeCosts {
    pub fn get(&self, weight: Weight) -> f64 {
        match weight {
            Weight::Shortest => self.shortest,
            Weight::Shaded => self.shaded,
        }
    }
}

/// Derives the routing weights of an edge.
///
/// The shortest weight is just the `length`. The shaded weight adds
/// a sun penalty of up to `alpha`, proportional to the lack of shade:
/// `length + (1 - clamp(shade, 0, 255) / 255) * alpha`.
///
/// Both weights are non-negative for non-negative `length` and `alpha`.
/// Use [validate_alpha] before deriving weights from user-provided values.
pub fn compute_costs(length: f64, shade: f64, alpha: f64) -> EdgeCosts {
    let shade = if shade.is_nan() { 0.0 } else { shade };
    let shade_factor = shade.clamp(0.0, MAX_SHADE) / MAX_SHADE;
    let sun_penalty = (1.0 - shade_factor) * alpha;

    EdgeCosts {
        shortest: length,
        shaded: length + sun_penalty,
    }
}

/// Derives the routing weights of an [Edge], treating a missing length
/// as [DEFAULT_LENGTH] and a missing shade as full sun.
pub fn edge_costs(edge: &Edge, alpha: f64) -> EdgeCosts {
    compute_costs(
        edge.length.unwrap_or(DEFAULT_LENGTH),
        edge.shade.unwrap_or(0.0),
        alpha,
    )
}

/// Ensures `alpha` can be used as a penalty strength.
pub fn validate_alpha(alpha: f64) -> Result<f64, InputRejected> {
    if alpha.is_finite() && alpha >= 0.0 {
        Ok(alpha)
    } else {
        Err(InputRejected::InvalidAlpha(alpha))
    }
}

/// Weights of every [Edge] in a [Graph] for a specific `alpha`, indexed by [EdgeId].
///
/// Kept outside of the graph, so that the topology can be shared immutably
/// and routes for different alphas never observe mixed costs.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    alpha: f64,
    costs: Vec<EdgeCosts>,
}

impl CostTable {
    /// Computes the weights of all edges of a graph.
    pub fn compute(g: &Graph, alpha: f64) -> Result<Self, InputRejected> {
        let alpha = validate_alpha(alpha)?;
        Ok(Self {
            alpha,
            costs: g.edges().iter().map(|e| edge_costs(e, alpha)).collect(),
        })
    }

    /// Copies the costs currently stored on the graph's edges,
    /// which must have been set by [apply_costs] with the same `alpha`.
    pub fn from_graph(g: &Graph, alpha: f64) -> Result<Self, InputRejected> {
        let alpha = validate_alpha(alpha)?;
        Ok(Self {
            alpha,
            costs: g
                .edges()
                .iter()
                .map(|e| EdgeCosts {
                    shortest: e.cost_shortest,
                    shaded: e.cost_shaded,
                })
                .collect(),
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Returns the cost of an edge. Unknown edges are impassable.
    pub fn get(&self, edge: EdgeId, weight: Weight) -> f64 {
        self.costs
            .get(edge)
            .map(|c| c.get(weight))
            .unwrap_or(f64::INFINITY)
    }
}

/// Recomputes and stores the derived costs on every edge of the graph.
///
/// Applying this function multiple times with the same `alpha` always yields the same costs.
/// An invalid `alpha` is rejected before any edge is touched.
pub fn apply_costs(g: &mut Graph, alpha: f64) -> Result<(), Error> {
    let alpha = validate_alpha(alpha)?;
    let updates: Vec<(Edge, EdgeCosts)> =
        g.edges().iter().map(|&e| (e, edge_costs(&e, alpha))).collect();

    for (e, c) in updates {
        g.set_edge_costs(e.from, e.to, e.key, c.shortest, c.shaded)?;
    }
    Ok(())
}
