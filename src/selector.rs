// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Turning a sequence of map clicks into a start-end pair.
//!
//! The first valid click selects the start, the second one the end, and the third one
//! starts over: it becomes the new start and the end is cleared. Clicks outside of the
//! area of interest are rejected without affecting the selection.

use crate::{BoundingBox, Coordinate, InputRejected};

/// State of a [PointSelector].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    HaveStart,
    HaveBoth,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointSelector {
    start: Option<Coordinate>,
    end: Option<Coordinate>,
}

impl PointSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (self.start, self.end) {
            (None, _) => Phase::Empty,
            (Some(_), None) => Phase::HaveStart,
            (Some(_), Some(_)) => Phase::HaveBoth,
        }
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.end
    }

    /// Feeds a clicked position into the state machine. `inside_aoi` tells whether the
    /// position lies in the area of interest; if not, the click is rejected and the
    /// selection is left unchanged.
    pub fn offer(
        &mut self,
        candidate: Coordinate,
        inside_aoi: bool,
    ) -> Result<Phase, InputRejected> {
        if !inside_aoi {
            return Err(InputRejected::OutsideAoi {
                lat: candidate.lat,
                lon: candidate.lon,
            });
        }

        match self.phase() {
            Phase::Empty | Phase::HaveBoth => {
                self.start = Some(candidate);
                self.end = None;
            }
            Phase::HaveStart => self.end = Some(candidate),
        }

        Ok(self.phase())
    }

    /// Same as [PointSelector::offer], checking membership in the `aoi` directly.
    pub fn click(
        &mut self,
        aoi: &BoundingBox,
        candidate: Coordinate,
    ) -> Result<Phase, InputRejected> {
        self.offer(candidate, aoi.contains_coordinate(candidate))
    }

    /// Replaces the start point only, as with an explicit "set start" control.
    pub fn set_start(&mut self, aoi: &BoundingBox, c: Coordinate) -> Result<Phase, InputRejected> {
        Self::check(aoi, c)?;
        self.start = Some(c);
        Ok(self.phase())
    }

    /// Replaces the end point only, as with an explicit "set end" control.
    ///
    /// Without a start, the selection stays in [Phase::Empty] until one is provided.
    pub fn set_end(&mut self, aoi: &BoundingBox, c: Coordinate) -> Result<Phase, InputRejected> {
        Self::check(aoi, c)?;
        self.end = Some(c);
        Ok(self.phase())
    }

    /// Forgets both points.
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Returns the selected start-end pair, or which of them is missing.
    pub fn endpoints(&self) -> Result<(Coordinate, Coordinate), InputRejected> {
        let start = self.start.ok_or(InputRejected::MissingStart)?;
        let end = self.end.ok_or(InputRejected::MissingEnd)?;
        Ok((start, end))
    }

    fn check(aoi: &BoundingBox, c: Coordinate) -> Result<(), InputRejected> {
        if aoi.contains_coordinate(c) {
            Ok(())
        } else {
            Err(InputRejected::OutsideAoi {
                lat: c.lat,
                lon: c.lon,
            })
        }
    }
}
