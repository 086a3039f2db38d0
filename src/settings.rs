use crate::error::{Error, Result};
use crate::geodesic::EARTH_MEAN_RADIUS_M;
use crate::units;

/// Presentation choices for one measuring session.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub length_unit: String,
    pub area_unit: String,
    pub radius_m: f64,
    pub color: String,
    pub segments: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            length_unit: "m".to_string(),
            area_unit: "m".to_string(),
            radius_m: EARTH_MEAN_RADIUS_M,
            color: "#ff0000".to_string(),
            segments: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        units::LENGTH.factor(&self.length_unit)?;
        units::AREA.factor(&self.area_unit)?;
        if !(self.radius_m.is_finite() && self.radius_m > 0.0) {
            return Err(Error::InvalidRadius(self.radius_m));
        }
        Ok(())
    }

    pub fn info(&self) {
        log::info!("settings: length unit: {}", self.length_unit);
        log::info!("settings: area unit: {}", self.area_unit);
        log::info!("settings: radius: {:.1}m", self.radius_m);
    }
}
