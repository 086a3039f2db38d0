//! Geodesic area, perimeter and segment lengths of polygons traced on a map.
//!
//! The Earth is modelled as a sphere whose radius is passed to every call.

pub mod error;
pub mod geodesic;
pub mod point;
pub mod polygon;
pub mod projection;
pub mod read_polygon;
pub mod reference;
pub mod report;
pub mod segments;
pub mod settings;
pub mod svg;
pub mod units;

pub use error::{Error, Result};
pub use geodesic::{degrees_to_radians, great_circle_distance};
pub use point::Vertex;
pub use polygon::{area, perimeter, signed_area};
pub use segments::{Segment, segments};
pub use units::{convert_area, convert_length};
