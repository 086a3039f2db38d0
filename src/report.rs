use core::fmt;

use crate::error::Result;
use crate::polygon::Polygon;
use crate::segments::Segment;
use crate::settings::Settings;
use crate::units;

/// Measurements of one polygon, converted to the session's units.
#[derive(Clone, Debug)]
pub struct Report {
    pub name: String,
    pub area: f64,
    pub perimeter: f64,
    /// Segments with their distance already converted.
    pub segments: Vec<Segment>,
    pub length_unit: String,
    pub area_unit: String,
}

impl Report {
    pub fn measure(polygon: &Polygon, settings: &Settings) -> Result<Report> {
        let r = settings.radius_m;
        let area = units::convert_area(polygon.area(r), "m", &settings.area_unit)?;
        let perimeter = units::convert_length(polygon.perimeter(r), "m", &settings.length_unit)?;
        let mut segments = Vec::new();
        if settings.segments {
            for s in polygon.segments(r) {
                segments.push(Segment {
                    distance: units::convert_length(s.distance, "m", &settings.length_unit)?,
                    ..s
                });
            }
        }
        Ok(Report {
            name: polygon.name.clone(),
            area,
            perimeter,
            segments,
            length_unit: settings.length_unit.clone(),
            area_unit: settings.area_unit.clone(),
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(
            f,
            "       Area: {:.5}{}",
            self.area,
            units::area_label(&self.area_unit)
        )?;
        write!(f, "  Perimeter: {:.5}{}", self.perimeter, self.length_unit)?;
        for (i, s) in self.segments.iter().enumerate() {
            write!(
                f,
                "\n  Segment {}: from {} to {} distance {:.2}{}",
                i + 1,
                s.from,
                s.to,
                s.distance,
                self.length_unit
            )?;
        }
        Ok(())
    }
}
