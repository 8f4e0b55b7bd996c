// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::aoi::BOLOGNA;
use crate::{BoundingBox, DEFAULT_MAX_DISTANCE, DEFAULT_STEP_LIMIT};

/// Sun penalty strength used when none is provided.
pub const DEFAULT_ALPHA: f64 = 50.0;

/// Upper end of the recommended alpha range. Larger values are accepted,
/// but make the shaded route ignore length almost entirely.
pub const MAX_ALPHA: f64 = 500.0;

/// Settings of a [RoutingSession](crate::RoutingSession).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Area within which points may be selected.
    pub aoi: BoundingBox,

    /// How far (in meters) from the nearest node a selected point may be.
    pub max_distance: f64,

    /// Node expansion limit of every shortest-path search.
    pub step_limit: usize,

    /// How many per-alpha cost tables to keep around. At least one is always kept.
    pub cost_cache_size: usize,

    /// Sun penalty strength used when a request doesn't specify one.
    pub default_alpha: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aoi: BOLOGNA,
            max_distance: DEFAULT_MAX_DISTANCE,
            step_limit: DEFAULT_STEP_LIMIT,
            cost_cache_size: 8,
            default_alpha: DEFAULT_ALPHA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.aoi, BOLOGNA);
        assert_eq!(c.max_distance, 300.0);
        assert_eq!(c.default_alpha, DEFAULT_ALPHA);
        assert!(c.default_alpha <= MAX_ALPHA);
        assert_eq!(crate::validate_alpha(c.default_alpha), Ok(50.0));
    }
}
