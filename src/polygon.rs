use crate::{
    geodesic::{self, degrees_to_radians},
    point::{BoundingBox, Vertex},
    segments::{self, Segments},
};

/// A traced ring of vertices, as handed over by a reader or the map.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    pub name: String,
    pub vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn new(name: &str, vertices: Vec<Vertex>) -> Self {
        Polygon {
            name: name.to_string(),
            vertices,
        }
    }

    /// Builds a ring from a boundary that may repeat its first vertex at the end.
    pub fn from_closed(name: &str, mut vertices: Vec<Vertex>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self::new(name, vertices)
    }

    pub fn info(&self) {
        log::info!("polygon: name: {}", self.name);
        log::info!("polygon: len: {}", self.vertices.len());
        if let Some(b) = self.bbox() {
            log::info!("polygon: bbox: {}", b);
        }
        if self.vertices.len() < 3 {
            log::warn!(
                "polygon: {} vertices, area is zero",
                self.vertices.len()
            );
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::of(&self.vertices)
    }

    pub fn area(&self, radius_m: f64) -> f64 {
        area(&self.vertices, radius_m)
    }

    pub fn perimeter(&self, radius_m: f64) -> f64 {
        perimeter(&self.vertices, radius_m)
    }

    /// Distances along the traced vertices, without the closing edge.
    pub fn segments(&self, radius_m: f64) -> Segments<'_> {
        segments::segments(&self.vertices, radius_m)
    }
}

/// Sum over wrap-around edges of `Δlng · (2 + sin lat_i + sin lat_j)`, in radians.
fn excess_sum(ring: &[Vertex]) -> f64 {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let p1 = &ring[i];
        let p2 = &ring[(i + 1) % n];
        let dlng = degrees_to_radians(p2.lng) - degrees_to_radians(p1.lng);
        sum += dlng
            * (2.0 + degrees_to_radians(p1.lat).sin() + degrees_to_radians(p2.lat).sin());
    }
    sum
}

/// Area of the ring on a sphere, with the sign of its winding.
///
/// Positive for clockwise rings on a north-up map, negative otherwise.
/// Zero for fewer than three vertices.
pub fn signed_area(ring: &[Vertex], radius_m: f64) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    excess_sum(ring) * radius_m.powi(2) / 2.0
}

/// Unsigned area of the ring on a sphere, in square units of `radius_m`.
///
/// The edge sum treats each edge as a trapezoid on the sphere. It is accurate
/// for rings small compared to the Earth and drifts for continent-sized ones.
pub fn area(ring: &[Vertex], radius_m: f64) -> f64 {
    signed_area(ring, radius_m).abs()
}

/// Length of the closed boundary, including the edge from the last vertex
/// back to the first.
pub fn perimeter(ring: &[Vertex], radius_m: f64) -> f64 {
    let n = ring.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| geodesic::distance(&ring[i], &ring[(i + 1) % n], radius_m))
        .sum()
}
