use core::fmt;
use std::slice::Windows;

use crate::{geodesic, point::Vertex};

/// One leg of an open path, with its great-circle length in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vertex,
    pub to: Vertex,
    pub distance: f64,
}

impl Segment {
    pub fn between(from: Vertex, to: Vertex, radius_m: f64) -> Self {
        Segment {
            from,
            to,
            distance: geodesic::distance(&from, &to, radius_m),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {:.2}m", self.from, self.to, self.distance)
    }
}

/// Lazy iterator over consecutive vertex pairs.
#[derive(Clone)]
pub struct Segments<'a> {
    pairs: Windows<'a, Vertex>,
    radius_m: f64,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        self.pairs
            .next()
            .map(|w| Segment::between(w[0], w[1], self.radius_m))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl ExactSizeIterator for Segments<'_> {}

/// Segments of the open path, in order, without an edge back to the start.
pub fn segments(path: &[Vertex], radius_m: f64) -> Segments<'_> {
    Segments {
        pairs: path.windows(2),
        radius_m,
    }
}

pub fn path_length(path: &[Vertex], radius_m: f64) -> f64 {
    segments(path, radius_m).map(|s| s.distance).sum()
}
