use clap::Parser;
use clap::builder::PossibleValuesParser;
use polygon_measure::error::Result;
use polygon_measure::projection::UtmProjection;
use polygon_measure::report::Report;
use polygon_measure::settings::Settings;
use polygon_measure::{geodesic, read_polygon, reference, svg, units};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Area, perimeter and segment lengths of traced polygons")]
struct Cli {
    /// Coordinate file (txt, kml, gpx, geojson) or a directory of them
    path: PathBuf,
    /// Unit for perimeter and segment lengths
    #[arg(
        short,
        long,
        env = "POLYGON_LENGTH_UNIT",
        default_value = "m",
        value_parser = PossibleValuesParser::new(units::LENGTH.symbols())
    )]
    length_unit: String,
    /// Unit for areas (squares of the length units, plus ac and ha)
    #[arg(
        short,
        long,
        env = "POLYGON_AREA_UNIT",
        default_value = "m",
        value_parser = PossibleValuesParser::new(units::AREA.symbols())
    )]
    area_unit: String,
    /// Sphere radius in metres
    #[arg(short, long, env = "POLYGON_RADIUS", default_value_t = geodesic::EARTH_MEAN_RADIUS_M)]
    radius: f64,
    /// Print the distance between consecutive vertices
    #[arg(short, long)]
    segments: bool,
    /// Write the outlines to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Outline colour in the SVG
    #[arg(long, default_value = "#ff0000")]
    color: String,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            length_unit: self.length_unit.clone(),
            area_unit: self.area_unit.clone(),
            radius_m: self.radius,
            color: self.color.clone(),
            segments: self.segments,
        }
    }
}

fn run(args: &Cli) -> Result<()> {
    let settings = args.settings();
    settings.validate()?;
    settings.info();

    let polygons = read_polygon::read_polygons(&args.path)?;
    let area_label = units::area_label(&settings.area_unit);
    for polygon in &polygons {
        polygon.info();
        println!("{}", Report::measure(polygon, &settings)?);
        println!(
            "   geodesic: {:.1}{} (geo crate, WGS84)",
            units::convert_area(reference::geodesic_area(&polygon.vertices), "m", &settings.area_unit)?,
            area_label
        );
        println!(
            "     planar: {:.1}{} (utm)",
            units::convert_area(reference::utm_area(&polygon.vertices)?, "m", &settings.area_unit)?,
            area_label
        );
        println!();
    }

    if let Some(path) = &args.svg {
        let origin = polygons.iter().find_map(|p| p.vertices.first());
        if let Some(origin) = origin {
            let proj = UtmProjection::make(origin)?;
            let projected = polygons
                .iter()
                .map(|p| proj.project_all(&p.vertices))
                .collect::<Result<Vec<_>>>()?;
            let all: Vec<_> = projected.iter().flatten().copied().collect();
            let mut drawing = svg::SVG::init(&all);
            for points in &projected {
                drawing.add_polygon(points, &settings.color);
                drawing.add_markers(points);
            }
            std::fs::write(path, drawing.render())?;
            log::info!("svg: {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Cli::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
