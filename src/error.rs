use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown {table} unit `{symbol}`")]
    UnknownUnit { table: &'static str, symbol: String },

    #[error("line {line} ({content}): expected \"lat,lng\"")]
    Coordinate { line: usize, content: String },

    #[error("coordinate out of range: lat {lat}, lng {lng}")]
    OutOfRange { lat: f64, lng: f64 },

    #[error("invalid sphere radius: {0}")]
    InvalidRadius(f64),

    #[error("no polygon found in {}", .0.display())]
    NoPolygon(PathBuf),

    #[error("unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("projection: {0}")]
    Projection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Kml(#[from] kml::Error),

    #[error(transparent)]
    GeoJson(#[from] geojson::Error),

    #[error(transparent)]
    Gpx(#[from] gpx::errors::GpxError),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}
