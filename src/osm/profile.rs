// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Describes which OSM ways form the walking network of a [Graph](crate::Graph),
/// and where their shade measurement is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Human readable name of the routing profile.
    pub name: &'a str,

    /// Values of the [highway](https://wiki.openstreetmap.org/wiki/Key:highway) tag
    /// of ways usable for routing.
    pub highways: &'a [&'a str],

    /// Array of OSM [access tags](https://wiki.openstreetmap.org/wiki/Key:access#Land-based_transportation)
    /// (in order from least to most specific) to consider when checking for road prohibitions.
    pub access: &'a [&'a str],

    /// Tag holding the 0 (full sun) to 255 (full shade) shade value of a way.
    pub shade_tag: &'a str,
}

impl<'a> Profile<'a> {
    /// Checks if the way belongs to the walking network: it must have an allowed `highway`
    /// value, must not be an area and must not be prohibited by the access tags.
    pub fn is_routable(&self, tags: &HashMap<String, String>) -> bool {
        let highway_ok = tags
            .get("highway")
            .is_some_and(|h| self.highways.contains(&h.as_str()));

        let is_area = tags.get("area").map(|v| v.as_str()) == Some("yes");

        highway_ok && !is_area && self.is_allowed(tags)
    }

    /// Checks the access tags of a way; the most specific present tag decides.
    pub fn is_allowed(&self, tags: &HashMap<String, String>) -> bool {
        let decisive = self
            .access
            .iter()
            .rev()
            .find_map(|&key| tags.get(key).map(|v| v.as_str()));

        !matches!(decisive, Some("no" | "private"))
    }

    /// Returns the shade value of a way, [None] if the tag is absent,
    /// or `Some(Err(raw value))` if the tag can't be interpreted as a number.
    pub fn way_shade<'t>(
        &self,
        tags: &'t HashMap<String, String>,
    ) -> Option<Result<f64, &'t str>> {
        let raw = tags.get(self.shade_tag)?;
        Some(
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(raw.as_str()),
        )
    }
}

/// Pedestrian network, roughly following the OpenStreetMap "walk" network type:
/// everything a pedestrian may legally use, except motorways.
pub const WALK_PROFILE: Profile = Profile {
    name: "foot",
    highways: &[
        "trunk",
        "trunk_link",
        "primary",
        "primary_link",
        "secondary",
        "secondary_link",
        "tertiary",
        "tertiary_link",
        "unclassified",
        "residential",
        "living_street",
        "service",
        "road",
        "track",
        "pedestrian",
        "footway",
        "path",
        "steps",
        "corridor",
        "bridleway",
    ],
    access: &["access", "foot"],
    shade_tag: "shade",
};
