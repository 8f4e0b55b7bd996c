// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading walking networks with shade measurements from OpenStreetMap files.

mod profile;
mod reader;

pub use profile::{Profile, WALK_PROFILE};
pub use reader::{
    add_features_from_buffer, add_features_from_file, add_features_from_io, Error, FileFormat,
    Options,
};

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::super::{aoi::BOLOGNA, earth_distance, Graph};
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-6),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    const DATA: &[u8] = include_bytes!("reader/test_fixtures/walk.osm");

    fn options(file_format: FileFormat) -> Options<'static> {
        Options {
            profile: &WALK_PROFILE,
            file_format,
            bbox: Some(BOLOGNA),
        }
    }

    fn edge(g: &Graph, from: i64, to: i64) -> crate::Edge {
        let idx = g
            .find_edge(from, to, 0)
            .unwrap_or_else(|| panic!("missing edge {from} -> {to}"));
        *g.get_edge(idx).unwrap()
    }

    fn check_walk_graph(g: &Graph) {
        //   -5 ──────── -4
        //    │           │
        //    │           │ (oneway, ignored)
        //   -1 ── -2 ── -3
        //
        // -6 is outside of the bounding box, -7 and -8 are only used by unroutable ways.

        assert_eq!(g.len(), 5);
        assert_eq!(g.edge_count(), 10);
        assert!(g.get_node(-6).is_none());
        assert!(g.get_node(-7).is_none());
        assert!(g.get_node(-8).is_none());
        assert_eq!(g.validate(), Ok(()));

        // Footway with shade
        let e = edge(g, -1, -2);
        assert_eq!(e.shade, Some(200.0));
        assert_almost_eq!(
            e.length.unwrap(),
            earth_distance(44.4990, 11.3250, 44.4990, 11.3260)
        );
        assert_eq!(edge(g, -2, -1).shade, Some(200.0));

        // Oneway residential street is walkable in both directions, without shade
        assert_eq!(edge(g, -3, -4).shade, None);
        assert_eq!(edge(g, -4, -3).shade, None);

        // Path with an invalid shade value
        assert_eq!(edge(g, -4, -5).shade, None);
        assert_eq!(edge(g, -1, -5).shade, None);

        // Private service road
        assert!(g.find_edge(-5, -3, 0).is_none());
    }

    #[test]
    fn load_xml_from_buffer() {
        let mut g = Graph::default();
        add_features_from_buffer(&mut g, &options(FileFormat::Xml), DATA).unwrap();
        check_walk_graph(&g);
    }

    #[test]
    fn load_xml_from_io() {
        let mut g = Graph::default();
        add_features_from_io(&mut g, &options(FileFormat::Xml), DATA).unwrap();
        check_walk_graph(&g);
    }

    #[test]
    fn load_gz_with_detection() {
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
        encoder.write_all(DATA).unwrap();
        let compressed = encoder.finish().unwrap();

        let mut g = Graph::default();
        add_features_from_buffer(&mut g, &options(FileFormat::Unknown), &compressed).unwrap();
        check_walk_graph(&g);
    }

    #[test]
    fn load_bz2() {
        let mut encoder =
            bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::fast());
        encoder.write_all(DATA).unwrap();
        let compressed = encoder.finish().unwrap();

        let mut g = Graph::default();
        add_features_from_buffer(&mut g, &options(FileFormat::XmlBz2), &compressed).unwrap();
        check_walk_graph(&g);
    }

    #[test]
    fn without_bbox() {
        let mut g = Graph::default();
        let options = Options {
            profile: &WALK_PROFILE,
            file_format: FileFormat::Unknown,
            bbox: None,
        };
        add_features_from_buffer(&mut g, &options, DATA).unwrap();

        assert_eq!(g.len(), 6);
        assert_eq!(g.edge_count(), 12);
        assert_eq!(edge(&g, -6, -4).shade, Some(10.0));
    }

    #[test]
    fn way_leaving_the_bbox_is_split() {
        // -1 ── -2 ── -3 ── -4, with -2 north of the area of interest
        const DATA: &[u8] = br#"<osm>
            <node id="-1" lat="44.5070" lon="11.3250"/>
            <node id="-2" lat="44.5200" lon="11.3300"/>
            <node id="-3" lat="44.5070" lon="11.3350"/>
            <node id="-4" lat="44.5070" lon="11.3360"/>
            <way id="-1">
                <nd ref="-1"/>
                <nd ref="-2"/>
                <nd ref="-3"/>
                <nd ref="-4"/>
                <tag k="highway" v="footway"/>
            </way>
        </osm>"#;

        let mut g = Graph::default();
        add_features_from_buffer(&mut g, &options(FileFormat::Xml), DATA).unwrap();

        assert!(g.get_node(-1).is_none());
        assert!(g.get_node(-2).is_none());
        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 2);
        assert!(g.find_edge(-3, -4, 0).is_some());
        assert!(g.find_edge(-1, -3, 0).is_none());
        assert!(g.find_edge(-3, -1, 0).is_none());
    }

    #[test]
    fn detection() {
        assert_eq!(FileFormat::detect(b"<?xml"), FileFormat::Xml);
        assert_eq!(FileFormat::detect(&[0x1f, 0x8b, 0x08]), FileFormat::XmlGz);
        assert_eq!(FileFormat::detect(b"BZh91AY"), FileFormat::XmlBz2);
        assert_eq!(FileFormat::detect(b""), FileFormat::Xml);
    }

    #[test]
    fn invalid_xml() {
        let mut g = Graph::default();
        let result = add_features_from_buffer(
            &mut g,
            &options(FileFormat::Xml),
            b"<osm><way id=\"1\"></node></osm>",
        );
        assert!(matches!(result, Err(Error::Xml(_))));
    }
}
