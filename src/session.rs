// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::{
    plan, validate_alpha, Config, Coordinate, CostTable, Error, Graph, GraphIntegrityError,
    InputRejected, NodeId, NodeLocator, Phase, PointSelector, RouteMode, RouteRequest,
    RouteResult, Snap,
};

/// All state needed to answer routing requests for a single user:
/// the shared road network, the point selection and recently used edge costs.
///
/// The graph is never mutated - costs for each alpha are kept in separate
/// [CostTables](CostTable), so a route is always computed with costs for a single alpha.
#[derive(Debug, Clone)]
pub struct RoutingSession {
    graph: Arc<Graph>,
    locator: NodeLocator,
    selector: PointSelector,
    config: Config,

    /// Most recently used tables last.
    costs: Vec<Arc<CostTable>>,
}

impl RoutingSession {
    /// Creates a new session over a loaded graph. Fails if the graph is malformed.
    pub fn new(graph: Arc<Graph>, config: Config) -> Result<Self, GraphIntegrityError> {
        graph.validate()?;
        log::info!(
            "routing over {} nodes and {} edges",
            graph.len(),
            graph.edge_count()
        );

        Ok(Self {
            locator: NodeLocator::new(&graph, config.max_distance),
            graph,
            selector: PointSelector::new(),
            config,
            costs: Vec::default(),
        })
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selector(&self) -> &PointSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut PointSelector {
        &mut self.selector
    }

    /// Feeds a map click into the point selection. See [PointSelector::click].
    pub fn click(&mut self, c: Coordinate) -> Result<Phase, InputRejected> {
        let result = self.selector.click(&self.config.aoi, c);
        if let Err(ref e) = result {
            log::warn!("{}", e);
        }
        result
    }

    /// Forgets the selected points.
    pub fn clear(&mut self) {
        self.selector.clear();
    }

    /// Computes the routes between the currently selected points.
    pub fn compute(&mut self, alpha: f64, mode: RouteMode) -> Result<RouteResult, Error> {
        let (start, end) = self.selector.endpoints()?;
        self.route(start, end, alpha, mode)
    }

    /// Computes the routes between two explicitly provided points.
    pub fn route(
        &mut self,
        start: Coordinate,
        end: Coordinate,
        alpha: f64,
        mode: RouteMode,
    ) -> Result<RouteResult, Error> {
        let alpha = validate_alpha(alpha)?;
        let start = self.snap(start)?;
        let end = self.snap(end)?;

        let costs = self.costs_for(alpha)?;
        let request = RouteRequest {
            start,
            end,
            alpha,
            mode,
        };
        let result = plan(&self.graph, &costs, &request, self.config.step_limit)?;

        log::info!(
            "computed {:?} routes from {} to {} with alpha={}",
            mode,
            start,
            end,
            alpha
        );
        Ok(result)
    }

    /// Returns edge costs for the given alpha, computing them if they aren't cached.
    pub fn costs_for(&mut self, alpha: f64) -> Result<Arc<CostTable>, InputRejected> {
        // Normalize -0.0 to 0.0
        let alpha = validate_alpha(alpha)? + 0.0;

        if let Some(idx) = self
            .costs
            .iter()
            .position(|t| t.alpha().to_bits() == alpha.to_bits())
        {
            log::debug!("cost table for alpha={} is cached", alpha);
            let table = self.costs.remove(idx);
            self.costs.push(Arc::clone(&table));
            return Ok(table);
        }

        log::debug!("computing cost table for alpha={}", alpha);
        let table = Arc::new(CostTable::compute(&self.graph, alpha)?);

        let limit = self.config.cost_cache_size.max(1);
        while self.costs.len() >= limit {
            self.costs.remove(0);
        }
        self.costs.push(Arc::clone(&table));
        Ok(table)
    }

    fn snap(&self, c: Coordinate) -> Result<NodeId, InputRejected> {
        if !self.config.aoi.contains_coordinate(c) {
            return Err(InputRejected::OutsideAoi {
                lat: c.lat,
                lon: c.lon,
            });
        }

        match self.locator.locate(c.lat, c.lon) {
            Snap::Found { node, distance } => {
                log::debug!(
                    "snapped ({}, {}) to {} ({:.1} m)",
                    c.lat,
                    c.lon,
                    node,
                    distance
                );
                Ok(node)
            }
            Snap::NotFound { distance } => {
                let e = InputRejected::TooFarFromRoad {
                    lat: c.lat,
                    lon: c.lon,
                    distance,
                    max_distance: self.locator.max_distance(),
                };
                log::warn!("{}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{earth_distance, Node, Weight};

    const ROWS: i64 = 8;
    const COLS: i64 = 8;

    fn grid_id(row: i64, col: i64) -> NodeId {
        row * 100 + col + 1
    }

    /// A regular street grid spanning the Bologna area of interest, with shade
    /// varying from street to street.
    fn bologna_grid() -> Graph {
        let mut g = Graph::new();
        let lat_step = (44.5075 - 44.4960) / (ROWS - 1) as f64;
        let lon_step = (11.3460 - 11.3215) / (COLS - 1) as f64;

        for row in 0..ROWS {
            for col in 0..COLS {
                g.set_node(Node {
                    id: grid_id(row, col),
                    lat: 44.4960 + row as f64 * lat_step,
                    lon: 11.3215 + col as f64 * lon_step,
                });
            }
        }

        let mut connect = |a: NodeId, b: NodeId, salt: i64| {
            let na = g.get_node(a).unwrap();
            let nb = g.get_node(b).unwrap();
            let length = earth_distance(na.lat, na.lon, nb.lat, nb.lon);
            let shade = ((a * 37 + b * 91 + salt) % 256) as f64;
            g.add_undirected_edge(a, b, Some(length), Some(shade)).unwrap();
        };

        for row in 0..ROWS {
            for col in 0..COLS {
                if col + 1 < COLS {
                    connect(grid_id(row, col), grid_id(row, col + 1), 0);
                }
                if row + 1 < ROWS {
                    connect(grid_id(row, col), grid_id(row + 1, col), 13);
                }
            }
        }
        g
    }

    fn session() -> RoutingSession {
        RoutingSession::new(Arc::new(bologna_grid()), Config::default()).unwrap()
    }

    const START: Coordinate = Coordinate::new(44.4985, 11.3250);
    const END: Coordinate = Coordinate::new(44.5055, 11.3420);

    #[test]
    fn bologna_end_to_end() {
        let mut s = session();
        assert_eq!(s.click(START), Ok(Phase::HaveStart));
        assert_eq!(s.click(END), Ok(Phase::HaveBoth));

        let r = s.compute(50.0, RouteMode::Both).unwrap();
        let shortest = r.get(Weight::Shortest).unwrap();
        let shaded = r.get(Weight::Shaded).unwrap();

        assert!(!shortest.is_unreachable());
        assert!(!shaded.is_unreachable());
        assert_eq!(shortest.nodes.first(), shaded.nodes.first());
        assert_eq!(shortest.nodes.last(), shaded.nodes.last());
        assert_eq!(shortest.coordinates.len(), shortest.nodes.len());

        // Each route is optimal under its own metric
        assert!(shortest.total_length <= shaded.total_length + 1e-9);
        assert!(shaded.total_shaded <= shortest.total_shaded + 1e-9);
        assert!(shaded.total_shaded >= shaded.total_length);
    }

    #[test]
    fn totals_are_reproducible() {
        let mut s = session();
        let a = s.route(START, END, 120.0, RouteMode::Both).unwrap();
        let b = s.route(START, END, 120.0, RouteMode::Both).unwrap();
        for weight in [Weight::Shortest, Weight::Shaded] {
            assert_eq!(
                a.get(weight).unwrap().total_cost(),
                b.get(weight).unwrap().total_cost()
            );
        }
    }

    #[test]
    fn shortest_route_ignores_alpha() {
        let mut s = session();
        let calm = s.route(START, END, 0.0, RouteMode::Shortest).unwrap();
        let sunny = s.route(START, END, 500.0, RouteMode::Shortest).unwrap();
        assert_eq!(
            calm.shortest.unwrap().total_length,
            sunny.shortest.unwrap().total_length
        );
    }

    #[test]
    fn compute_requires_both_points() {
        let mut s = session();
        assert_eq!(
            s.compute(50.0, RouteMode::Both),
            Err(Error::Rejected(InputRejected::MissingStart))
        );
        s.click(START).unwrap();
        assert_eq!(
            s.compute(50.0, RouteMode::Both),
            Err(Error::Rejected(InputRejected::MissingEnd))
        );
    }

    #[test]
    fn rejects_invalid_alpha() {
        let mut s = session();
        let e = s.route(START, END, -1.0, RouteMode::Both).unwrap_err();
        assert!(e.is_input_rejection());
        assert_eq!(e, Error::Rejected(InputRejected::InvalidAlpha(-1.0)));
    }

    #[test]
    fn rejects_points_outside_aoi() {
        let mut s = session();
        let outside = Coordinate::new(44.4900, 11.3300);
        assert!(matches!(
            s.click(outside),
            Err(InputRejected::OutsideAoi { .. })
        ));
        assert_eq!(s.selector().phase(), Phase::Empty);
        assert!(matches!(
            s.route(outside, END, 50.0, RouteMode::Both),
            Err(Error::Rejected(InputRejected::OutsideAoi { .. }))
        ));
    }

    #[test]
    fn rejects_points_far_from_roads() {
        // Only the south-western quarter of the area of interest has roads
        let mut g = Graph::new();
        g.set_node(Node {
            id: 1,
            lat: 44.4970,
            lon: 11.3220,
        });
        g.set_node(Node {
            id: 2,
            lat: 44.4975,
            lon: 11.3230,
        });
        g.add_undirected_edge(1, 2, Some(95.0), None).unwrap();
        let mut s = RoutingSession::new(Arc::new(g), Config::default()).unwrap();

        let e = s.route(Coordinate::new(44.4971, 11.3221), END, 50.0, RouteMode::Both);
        assert!(matches!(
            e,
            Err(Error::Rejected(InputRejected::TooFarFromRoad { distance, max_distance, .. }))
                if distance > 1_000.0 && max_distance == 300.0
        ));
    }

    #[test]
    fn disconnected_endpoints_are_unreachable() {
        let mut g = Graph::new();
        g.set_node(Node {
            id: 1,
            lat: 44.4985,
            lon: 11.3250,
        });
        g.set_node(Node {
            id: 2,
            lat: 44.4990,
            lon: 11.3255,
        });
        g.set_node(Node {
            id: 3,
            lat: 44.5055,
            lon: 11.3420,
        });
        g.set_node(Node {
            id: 4,
            lat: 44.5050,
            lon: 11.3415,
        });
        g.add_undirected_edge(1, 2, Some(70.0), None).unwrap();
        g.add_undirected_edge(3, 4, Some(70.0), None).unwrap();
        let mut s = RoutingSession::new(Arc::new(g), Config::default()).unwrap();

        let r = s.route(START, END, 50.0, RouteMode::Both).unwrap();
        assert!(r.iter().all(|route| route.is_unreachable()));
        assert_eq!(r.iter().count(), 2);
    }

    #[test]
    fn cost_tables_are_cached_per_alpha() {
        let config = Config {
            cost_cache_size: 2,
            ..Config::default()
        };
        let mut s = RoutingSession::new(Arc::new(bologna_grid()), config).unwrap();

        let a = s.costs_for(10.0).unwrap();
        assert!(Arc::ptr_eq(&a, &s.costs_for(10.0).unwrap()));

        let b = s.costs_for(20.0).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &s.costs_for(10.0).unwrap()));

        // 20 is now the least recently used one, and gets evicted
        s.costs_for(30.0).unwrap();
        assert!(!Arc::ptr_eq(&b, &s.costs_for(20.0).unwrap()));
        assert_eq!(*b, *s.costs_for(20.0).unwrap());

        let zero = s.costs_for(0.0).unwrap();
        assert!(Arc::ptr_eq(&zero, &s.costs_for(-0.0).unwrap()));
    }

    #[test]
    fn invalid_alpha_is_never_cached() {
        let mut s = session();
        assert_eq!(s.costs_for(-10.0), Err(InputRejected::InvalidAlpha(-10.0)));
        assert!(matches!(
            s.costs_for(f64::NAN),
            Err(InputRejected::InvalidAlpha(_))
        ));
        assert!(s.costs.is_empty());
    }
}
