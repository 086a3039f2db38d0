use core::fmt;

use proj4rs::proj::Proj;

use crate::{
    error::{Error, Result},
    point::Vertex,
};

/// A vertex projected onto a plane, in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for ProjectedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utm(x: {:.1}, y: {:.1})", self.x, self.y)
    }
}

fn projection_error(e: impl fmt::Debug) -> Error {
    Error::Projection(format!("{:?}", e))
}

pub struct UtmProjection {
    zone: u8,
    south: bool,
    wgs84_spec: Proj,
    dst_spec: Proj,
}

impl UtmProjection {
    /// UTM projection for the zone containing `origin`.
    pub fn make(origin: &Vertex) -> Result<UtmProjection> {
        let zone = utm_zone(origin.lng);
        let south = origin.lat < 0.0;
        let spec = format!(
            "+proj=utm +zone={}{} +datum=WGS84 +units=m +no_defs +type=crs",
            zone,
            if south { " +south" } else { "" }
        );
        log::trace!("projection: {}", spec);
        let dst_spec = Proj::from_proj_string(spec.as_str()).map_err(projection_error)?;
        let wgs84_spec = Proj::from_proj_string("+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs")
            .map_err(projection_error)?;
        Ok(UtmProjection {
            zone,
            south,
            wgs84_spec,
            dst_spec,
        })
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn is_south(&self) -> bool {
        self.south
    }

    pub fn project(&self, v: &Vertex) -> Result<ProjectedPoint> {
        if utm_zone(v.lng) != self.zone {
            log::warn!("outside utm zone {}: {}", self.zone, v);
        }
        let mut p = (v.lng.to_radians(), v.lat.to_radians());
        proj4rs::transform::transform(&self.wgs84_spec, &self.dst_spec, &mut p)
            .map_err(projection_error)?;
        Ok(ProjectedPoint { x: p.0, y: p.1 })
    }

    pub fn project_all(&self, vertices: &[Vertex]) -> Result<Vec<ProjectedPoint>> {
        vertices.iter().map(|v| self.project(v)).collect()
    }
}

pub fn utm_zone(lng: f64) -> u8 {
    let zone = ((lng + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}
