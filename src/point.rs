use core::fmt;

use crate::error::{Error, Result};

/// A map vertex in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub lat: f64,
    pub lng: f64,
}

impl Vertex {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Vertex { lat, lng }
    }

    /// Like `new`, but rejects coordinates outside lat [-90, 90], lng [-180, 180].
    pub fn checked(lat: f64, lng: f64) -> Result<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Ok(Vertex { lat, lng })
        } else {
            Err(Error::OutOfRange { lat, lng })
        }
    }

    pub fn coord(&self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

impl From<geo::Coord<f64>> for Vertex {
    fn from(c: geo::Coord<f64>) -> Self {
        Vertex { lat: c.y, lng: c.x }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vertex,
    pub max: Vertex,
}

impl BoundingBox {
    pub fn from(p1: &Vertex, p2: &Vertex) -> Self {
        let min = Vertex::new(p1.lat.min(p2.lat), p1.lng.min(p2.lng));
        let max = Vertex::new(p1.lat.max(p2.lat), p1.lng.max(p2.lng));
        Self { min, max }
    }

    /// Smallest box holding every vertex, `None` when there are none.
    pub fn of(vertices: &[Vertex]) -> Option<Self> {
        let first = vertices.first()?;
        Some(
            vertices
                .iter()
                .fold(BoundingBox::from(first, first), |b, v| BoundingBox {
                    min: Vertex::new(b.min.lat.min(v.lat), b.min.lng.min(v.lng)),
                    max: Vertex::new(b.max.lat.max(v.lat), b.max.lng.max(v.lng)),
                }),
        )
    }

    pub fn contains(&self, v: &Vertex) -> bool {
        v.lng >= self.min.lng
            && v.lng <= self.max.lng
            && v.lat >= self.min.lat
            && v.lat <= self.max.lat
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bbox(min: {}, max: {})", self.min, self.max)
    }
}
