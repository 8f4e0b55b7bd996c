// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod dijkstra;
mod error;

pub use dijkstra::{shortest_path, Path};
pub use error::{PlanError, DEFAULT_STEP_LIMIT};

use crate::{validate_alpha, CostTable, Error, Graph, Route, RouteRequest, RouteResult, Weight};

/// Computes every route requested by the [RouteMode](crate::RouteMode) of the request.
///
/// `costs` must have been computed for `request.alpha` - the planner never re-derives costs.
///
/// A missing route is reported as an [unreachable](Route::is_unreachable) route
/// for that weight only; other requested routes are still returned.
///
/// An invalid `request.alpha` is rejected with [InputRejected](crate::InputRejected)
/// before any search starts.
pub fn plan(
    g: &Graph,
    costs: &CostTable,
    request: &RouteRequest,
    step_limit: usize,
) -> Result<RouteResult, Error> {
    validate_alpha(request.alpha)?;
    debug_assert_eq!(costs.alpha(), request.alpha, "stale cost table");
    debug_assert_eq!(costs.len(), g.edge_count(), "cost table of a different graph");

    let mut result = RouteResult {
        alpha: request.alpha,
        shortest: None,
        shaded: None,
    };

    for &weight in request.mode.weights() {
        let path = shortest_path(g, costs, weight, request.start, request.end, step_limit)?;
        let route = assemble_route(g, costs, weight, path);

        if route.is_unreachable() {
            log::warn!(
                "no {} route from {} to {}",
                weight,
                request.start,
                request.end
            );
        } else {
            log::debug!(
                "{} route from {} to {}: {} nodes, {:.1} m, shaded cost {:.1}",
                weight,
                request.start,
                request.end,
                route.nodes.len(),
                route.total_length,
                route.total_shaded,
            );
        }

        match weight {
            Weight::Shortest => result.shortest = Some(route),
            Weight::Shaded => result.shaded = Some(route),
        }
    }

    Ok(result)
}

/// Converts a [Path] into a [Route], with coordinates and totals under both weights.
fn assemble_route(g: &Graph, costs: &CostTable, weight: Weight, path: Path) -> Route {
    if path.is_empty() {
        return Route::unreachable(weight);
    }

    let coordinates = path
        .nodes
        .iter()
        .filter_map(|&id| g.coordinate(id))
        .collect();

    let total_length = path
        .edges
        .iter()
        .map(|&e| costs.get(e, Weight::Shortest))
        .sum();

    let total_shaded = path
        .edges
        .iter()
        .map(|&e| costs.get(e, Weight::Shaded))
        .sum();

    Route {
        weight,
        nodes: path.nodes,
        coordinates,
        total_length,
        total_shaded,
    }
}
