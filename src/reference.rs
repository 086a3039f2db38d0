//! Independent area figures from the `geo` crate, used to sanity check the
//! spherical formulas.

use geo::algorithm::geodesic_area::GeodesicArea;
use geo::orient::Direction;
use geo::{Area, ChamberlainDuquetteArea, Coord, Orient, Polygon};

use crate::error::Result;
use crate::point::Vertex;
use crate::projection::{ProjectedPoint, UtmProjection};

fn geo_polygon(coords: Vec<Coord<f64>>) -> Polygon<f64> {
    // Create a geo::Polygon (exterior ring, no holes)
    let geo_polygon = Polygon::new(coords.into(), vec![]);
    geo_polygon.orient(Direction::Default)
}

/// Area on the WGS84 ellipsoid (Karney), in square metres.
pub fn geodesic_area(polygon: &[Vertex]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = polygon.iter().map(|v| v.coord()).collect();
    geo_polygon(coords).geodesic_area_unsigned()
}

/// Same edge-sum formula as `polygon::area`, on the WGS84 equatorial radius.
pub fn spherical_area(polygon: &[Vertex]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = polygon.iter().map(|v| v.coord()).collect();
    geo_polygon(coords).chamberlain_duquette_unsigned_area()
}

pub fn planar_area(polygon: &[ProjectedPoint]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = polygon.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    geo_polygon(coords).unsigned_area()
}

/// Planar area after projecting into the UTM zone of the first vertex.
pub fn utm_area(polygon: &[Vertex]) -> Result<f64> {
    match polygon.first() {
        Some(origin) if polygon.len() >= 3 => {
            let proj = UtmProjection::make(origin)?;
            Ok(planar_area(&proj.project_all(polygon)?))
        }
        _ => Ok(0.0),
    }
}
