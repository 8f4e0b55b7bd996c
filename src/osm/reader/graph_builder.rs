// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::{earth_distance, Graph, Node};

use super::{model, FeatureReader, Options};

/// Helper object used for storing state related to converting [OSM features](super::model::Feature)
/// into a walking network [Graph].
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    options: &'a Options<'a>,
    unused_nodes: HashSet<i64>,
    ways: usize,
    skipped_ways: usize,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new, empty graph builder.
    pub(super) fn new(g: &'a mut Graph, options: &'a Options<'a>) -> Self {
        Self {
            g,
            options,
            unused_nodes: HashSet::default(),
            ways: 0,
            skipped_ways: 0,
        }
    }

    /// Add all features from the provided [FeatureReader].
    pub(super) fn add_features<F: FeatureReader>(
        &mut self,
        mut features: F,
    ) -> Result<(), F::Error> {
        while let Some(f) = features.next()? {
            self.add_feature(f);
        }
        self.cleanup();

        log::info!(
            "loaded {} {} ways ({} skipped): {} nodes, {} edges",
            self.ways,
            self.options.profile.name,
            self.skipped_ways,
            self.g.len(),
            self.g.edge_count(),
        );
        Ok(())
    }

    fn cleanup(&mut self) {
        self.unused_nodes
            .iter()
            .for_each(|&id| self.g.delete_unconnected_node(id));
        self.unused_nodes.clear();
    }

    fn add_feature(&mut self, f: model::Feature) {
        match f {
            model::Feature::Node(n) => self.add_node(n),
            model::Feature::Way(w) => self.add_way(w),
        }
    }

    fn add_node(&mut self, n: Node) {
        if self.is_in_bbox(n.lat, n.lon) && self.g.get_node(n.id).is_none() {
            self.g.set_node(n);
            self.unused_nodes.insert(n.id);
        }
    }

    fn is_in_bbox(&self, lat: f64, lon: f64) -> bool {
        self.options
            .bbox
            .map_or(true, |bbox| bbox.contains(lat, lon))
    }

    fn add_way(&mut self, w: model::Way) {
        if !self.options.profile.is_routable(&w.tags) {
            return;
        }

        let runs = self.get_way_runs(&w);
        if runs.is_empty() {
            log::debug!("way {} has less than 2 nodes in the graph - skipping", w.id);
            self.skipped_ways += 1;
            return;
        }

        let shade = match self.options.profile.way_shade(&w.tags) {
            None => None,
            Some(Ok(shade)) => Some(shade),
            Some(Err(raw)) => {
                log::warn!("way {} has an invalid shade value {:?} - ignoring", w.id, raw);
                None
            }
        };

        for nodes in &runs {
            self.create_edges(nodes, shade);
            nodes.iter().for_each(|node_id| {
                self.unused_nodes.remove(node_id);
            });
        }
        self.ways += 1;
    }

    /// Splits a way into runs of consecutive nodes present in the graph.
    /// Unknown nodes (e.g. outside of the bounding box) split the way - their
    /// neighbors are never connected directly. Runs with less than 2 nodes are dropped.
    fn get_way_runs(&self, w: &model::Way) -> Vec<Vec<i64>> {
        let mut runs: Vec<Vec<i64>> = Vec::default();
        let mut current: Vec<i64> = Vec::default();

        for &node_id in &w.nodes {
            if self.g.get_node(node_id).is_some() {
                current.push(node_id);
            } else if current.len() >= 2 {
                runs.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }

        if current.len() >= 2 {
            runs.push(current);
        }
        runs
    }

    /// Adds edges in both directions between consecutive nodes - `oneway`
    /// restrictions don't apply to pedestrians.
    fn create_edges(&mut self, nodes: &[i64], shade: Option<f64>) {
        debug_assert!(nodes.len() >= 2);

        for pair in nodes.windows(2) {
            let (Some(left), Some(right)) = (self.g.get_node(pair[0]), self.g.get_node(pair[1]))
            else {
                continue;
            };

            if left.id == right.id {
                continue;
            }

            let length = earth_distance(left.lat, left.lon, right.lat, right.lon);
            if let Err(e) = self
                .g
                .add_undirected_edge(left.id, right.id, Some(length), shade)
            {
                log::warn!("{}", e);
            }
        }
    }
}
