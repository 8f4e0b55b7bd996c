use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use shadowroute::{aoi, BoundingBox, Config, Coordinate, RouteMode, RoutingSession};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] shadowroute::osm::Error);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Shortest,
    Shaded,
    Both,
}

impl From<Mode> for RouteMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Shortest => RouteMode::Shortest,
            Mode::Shaded => RouteMode::Shaded,
            Mode::Both => RouteMode::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Auto,
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for shadowroute::osm::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => Self::Unknown,
            Format::Xml => Self::Xml,
            Format::XmlGz => Self::XmlGz,
            Format::XmlBz2 => Self::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file, with `shade` tags on ways
    osm_file: PathBuf,

    /// Latitude of the start point
    #[arg(default_value_t = 44.4985, allow_negative_numbers = true)]
    start_lat: f64,

    /// Longitude of the start point
    #[arg(default_value_t = 11.3250, allow_negative_numbers = true)]
    start_lon: f64,

    /// Latitude of the end point
    #[arg(default_value_t = 44.5055, allow_negative_numbers = true)]
    end_lat: f64,

    /// Longitude of the end point
    #[arg(default_value_t = 11.3420, allow_negative_numbers = true)]
    end_lon: f64,

    /// Sun penalty strength (recommended range: 0 to 500) [default: 50]
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Which routes to compute
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// Format of the OSM file
    #[arg(short, long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Maximum distance (in meters) between a point and the nearest road
    #[arg(long, default_value_t = shadowroute::DEFAULT_MAX_DISTANCE)]
    max_distance: f64,

    /// Northern edge of the area of interest
    #[arg(long, default_value_t = aoi::BOLOGNA.north(), allow_negative_numbers = true)]
    north: f64,

    /// Southern edge of the area of interest
    #[arg(long, default_value_t = aoi::BOLOGNA.south(), allow_negative_numbers = true)]
    south: f64,

    /// Eastern edge of the area of interest
    #[arg(long, default_value_t = aoi::BOLOGNA.east(), allow_negative_numbers = true)]
    east: f64,

    /// Western edge of the area of interest
    #[arg(long, default_value_t = aoi::BOLOGNA.west(), allow_negative_numbers = true)]
    west: f64,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let config = Config {
        aoi: BoundingBox::new(cli.north, cli.south, cli.east, cli.west)?,
        max_distance: cli.max_distance,
        ..Config::default()
    };

    let alpha = cli.alpha.unwrap_or(config.default_alpha);
    if alpha > shadowroute::MAX_ALPHA {
        log::warn!(
            "alpha={} is above the recommended maximum of {}",
            alpha,
            shadowroute::MAX_ALPHA
        );
    }

    let g = load_graph(&cli.osm_file, &config.aoi, cli.format)?;
    let mut session = RoutingSession::new(Arc::new(g), config)?;

    let routes = session.route(
        Coordinate::new(cli.start_lat, cli.start_lon),
        Coordinate::new(cli.end_lat, cli.end_lon),
        alpha,
        cli.mode.into(),
    )?;

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");

    let mut features = routes.iter().peekable();
    while let Some(route) = features.next() {
        println!("    {{");
        println!("      \"type\": \"Feature\",");
        println!("      \"properties\": {{");
        println!("        \"mode\": \"{}\",", route.weight);
        println!("        \"alpha\": {},", routes.alpha);
        println!("        \"reachable\": {},", !route.is_unreachable());
        println!("        \"length\": {:.3},", route.total_length);
        println!("        \"shaded_cost\": {:.3}", route.total_shaded);
        println!("      }},");

        println!("      \"geometry\": {{");
        println!("        \"type\": \"LineString\",");
        println!("        \"coordinates\": [");

        let mut coordinates = route.coordinates.iter().peekable();
        while let Some(c) = coordinates.next() {
            let suffix = if coordinates.peek().is_some() { "," } else { "" };
            println!("          [{}, {}]{}", c.lon, c.lat, suffix);
        }

        println!("        ]");
        println!("      }}");

        let suffix = if features.peek().is_some() { "," } else { "" };
        println!("    }}{}", suffix);
    }

    println!("  ]");
    println!("}}");

    Ok(())
}

fn load_graph<P: AsRef<Path>>(
    path: P,
    bbox: &BoundingBox,
    format: Format,
) -> Result<shadowroute::Graph, GraphLoadError> {
    let mut g = shadowroute::Graph::default();
    let options = shadowroute::osm::Options {
        profile: &shadowroute::osm::WALK_PROFILE,
        file_format: format.into(),
        bbox: Some(*bbox),
    };
    match shadowroute::osm::add_features_from_file(&mut g, &options, path.as_ref()) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
