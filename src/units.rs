//! Length and area conversion tables.
//!
//! Each entry is the size of a unit in the table's base unit: millimetres for
//! length, square millimetres for area. Area symbols name the square of the
//! length unit (`m` is m²), except `ac` and `ha`.

use crate::error::{Error, Result};

pub struct UnitTable {
    pub name: &'static str,
    entries: &'static [(&'static str, f64)],
}

pub const LENGTH: UnitTable = UnitTable {
    name: "length",
    entries: &[
        ("mm", 1.0),
        ("cm", 10.0),
        ("dm", 100.0),
        ("m", 1_000.0),
        ("km", 1_000_000.0),
        ("in", 25.4),
        ("ft", 304.8),
        ("yd", 914.4),
        ("mi", 1_609_344.0),
    ],
};

pub const AREA: UnitTable = UnitTable {
    name: "area",
    entries: &[
        ("mm", 1.0),
        ("cm", 100.0),
        ("dm", 10_000.0),
        ("m", 1_000_000.0),
        ("km", 1e12),
        ("in", 645.16),
        ("ft", 92_903.04),
        ("yd", 836_127.36),
        ("ac", 4_046_856_422.4),
        ("ha", 1e10),
    ],
};

impl UnitTable {
    pub fn factor(&self, symbol: &str) -> Result<f64> {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, f)| *f)
            .ok_or_else(|| Error::UnknownUnit {
                table: self.name,
                symbol: symbol.to_string(),
            })
    }

    pub fn symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(s, _)| *s)
    }

    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        let from_factor = self.factor(from)?;
        let to_factor = self.factor(to)?;
        if from == to {
            return Ok(value);
        }
        Ok(value * from_factor / to_factor)
    }
}

pub fn convert_length(value: f64, from: &str, to: &str) -> Result<f64> {
    LENGTH.convert(value, from, to)
}

pub fn convert_area(value: f64, from: &str, to: &str) -> Result<f64> {
    AREA.convert(value, from, to)
}

/// Display label for an area unit: `m²` for `m`, `ha` for `ha`.
pub fn area_label(symbol: &str) -> String {
    match symbol {
        "ac" | "ha" => symbol.to_string(),
        _ => format!("{}²", symbol),
    }
}
