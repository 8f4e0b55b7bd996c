// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Area of interest - the fixed rectangle within which routing is supported.

use crate::Coordinate;

/// Returned by [BoundingBox::new] for degenerate or non-finite bounds.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid bounding box: north={north} south={south} east={east} west={west}")]
pub struct InvalidBoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Axis-aligned latitude-longitude rectangle, guaranteed to have
/// `north > south` and `east > west`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

/// Centre of Bologna, Italy.
pub const BOLOGNA: BoundingBox = BoundingBox {
    north: 44.50776772181009,
    south: 44.49584275842293,
    east: 11.346221029006651,
    west: 11.32117165803459,
};

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, InvalidBoundingBox> {
        let all_finite = [north, south, east, west].iter().all(|x| x.is_finite());
        if all_finite && north > south && east > west {
            Ok(Self {
                north,
                south,
                east,
                west,
            })
        } else {
            Err(InvalidBoundingBox {
                north,
                south,
                east,
                west,
            })
        }
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    /// Checks if the position lies within `[south, north] × [west, east]` (edges included).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }

    pub fn contains_coordinate(&self, c: Coordinate) -> bool {
        self.contains(c.lat, c.lon)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.north + self.south) * 0.5,
            (self.east + self.west) * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_enforces_orientation() {
        assert!(BoundingBox::new(1.0, 0.0, 1.0, 0.0).is_ok());
        assert!(BoundingBox::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(BoundingBox::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(BoundingBox::new(1.0, 1.0, 1.0, 0.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn bologna_membership() {
        assert!(BOLOGNA.contains(44.4985, 11.3250));
        assert!(BOLOGNA.contains(44.5055, 11.3420));
        assert!(BOLOGNA.contains_coordinate(BOLOGNA.center()));
        assert!(BOLOGNA.contains(BOLOGNA.north(), BOLOGNA.west()));
        assert!(!BOLOGNA.contains(44.4940, 11.3300));
        assert!(!BOLOGNA.contains(44.5000, 11.3500));
    }

    #[test]
    fn bologna_is_valid() {
        assert_eq!(
            BoundingBox::new(BOLOGNA.north, BOLOGNA.south, BOLOGNA.east, BOLOGNA.west),
            Ok(BOLOGNA)
        );
    }
}
