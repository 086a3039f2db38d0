use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::point::Vertex;
use crate::polygon::Polygon;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Format {
    Text,
    Kml,
    Gpx,
    GeoJson,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "csv" => Some(Format::Text),
            "kml" => Some(Format::Kml),
            "gpx" => Some(Format::Gpx),
            "geojson" | "json" => Some(Format::GeoJson),
            _ => None,
        }
    }
}

fn checked(vertices: impl Iterator<Item = Vertex>) -> Result<Vec<Vertex>> {
    vertices.map(|v| Vertex::checked(v.lat, v.lng)).collect()
}

mod loctext {
    use super::*;

    /// One `lat,lng` pair per line, as typed into the marker box.
    pub fn read(content: &str, name: &str) -> Result<Vec<Polygon>> {
        let mut vertices = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let bad = || Error::Coordinate {
                line: i + 1,
                content: line.to_string(),
            };
            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            if parts.len() != 2 {
                return Err(bad());
            }
            let lat: f64 = parts[0].parse().map_err(|_| bad())?;
            let lng: f64 = parts[1].parse().map_err(|_| bad())?;
            vertices.push(Vertex::checked(lat, lng)?);
        }
        if vertices.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Polygon::from_closed(name, vertices)])
    }
}

mod lockml {
    use super::*;
    use kml::Kml;
    use kml::types::Geometry;

    fn find_first_ring(kml: &Kml) -> Option<(Option<String>, geo::LineString)> {
        match kml {
            Kml::KmlDocument(doc) => doc.elements.iter().find_map(find_first_ring),
            Kml::Document { elements, .. } => elements.iter().find_map(find_first_ring),
            Kml::Folder(z) => z.elements.iter().find_map(find_first_ring),
            Kml::Placemark(p) => match &p.geometry {
                Some(Geometry::Polygon(poly)) => {
                    let (exterior, _) = geo::Polygon::from(poly.clone()).into_inner();
                    Some((p.name.clone(), exterior))
                }
                Some(Geometry::LineString(ls)) => {
                    Some((p.name.clone(), geo::LineString::from(ls.clone())))
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn read(content: &str, name: &str) -> Result<Vec<Polygon>> {
        let kml: Kml = content.parse()?;
        // KML can nest placemarks in folders and documents: take the first one
        let Some((placemark, ring)) = find_first_ring(&kml) else {
            return Ok(Vec::new());
        };
        let vertices = checked(ring.coords().map(|c| Vertex::from(*c)))?;
        let name = placemark.unwrap_or_else(|| name.to_string());
        Ok(vec![Polygon::from_closed(&name, vertices)])
    }
}

mod locgpx {
    use super::*;
    use gpx::{Gpx, Waypoint};
    use std::io::Cursor;

    fn ring(points: &[Waypoint]) -> Result<Vec<Vertex>> {
        checked(points.iter().map(|w| Vertex::from(w.point().0)))
    }

    pub fn read(content: &str, name: &str) -> Result<Vec<Polygon>> {
        let gpx: Gpx = gpx::read(Cursor::new(content))?;

        let mut ret = Vec::new();
        for (t, track) in gpx.tracks.iter().enumerate() {
            let base = track.name.clone().unwrap_or_else(|| format!("{}#{}", name, t));
            for (s, segment) in track.segments.iter().enumerate() {
                let label = if track.segments.len() > 1 {
                    format!("{}/{}", base, s)
                } else {
                    base.clone()
                };
                ret.push(Polygon::from_closed(&label, ring(&segment.points)?));
            }
        }
        for (r, route) in gpx.routes.iter().enumerate() {
            let label = route
                .name
                .clone()
                .unwrap_or_else(|| format!("{}@route{}", name, r));
            ret.push(Polygon::from_closed(&label, ring(&route.points)?));
        }
        Ok(ret)
    }
}

mod locjson {
    use super::*;
    use geojson::{GeoJson, Geometry, Value};

    pub fn read(content: &str, name: &str) -> Result<Vec<Polygon>> {
        let geojson: GeoJson = content.parse()?;

        let mut ret = Vec::new();
        match geojson {
            GeoJson::FeatureCollection(collection) => {
                for (i, feature) in collection.features.iter().enumerate() {
                    let label = feature
                        .property("name")
                        .and_then(|v| v.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{}#{}", name, i));
                    if let Some(geometry) = &feature.geometry {
                        ret.extend(geometry_to_polygon(geometry, &label)?);
                    }
                }
            }
            GeoJson::Feature(feature) => {
                let label = feature
                    .property("name")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| name.to_string());
                if let Some(geometry) = &feature.geometry {
                    ret.extend(geometry_to_polygon(geometry, &label)?);
                }
            }
            GeoJson::Geometry(geometry) => ret.extend(geometry_to_polygon(&geometry, name)?),
        }
        Ok(ret)
    }

    fn positions<P: std::ops::Index<usize, Output = f64>>(coords: &[P]) -> Result<Vec<Vertex>> {
        checked(coords.iter().map(|p| Vertex::new(p[1], p[0])))
    }

    fn geometry_to_polygon(geometry: &Geometry, name: &str) -> Result<Option<Polygon>> {
        let ring = match &geometry.value {
            Value::Polygon(coords) => coords.first(),
            // Only the first polygon of a MultiPolygon is measured
            Value::MultiPolygon(multi_coords) => multi_coords.first().and_then(|c| c.first()),
            Value::LineString(coords) => Some(coords),
            _ => None,
        };
        match ring {
            Some(coords) => Ok(Some(Polygon::from_closed(name, positions(coords)?))),
            None => Ok(None),
        }
    }
}

pub fn read_str(content: &str, format: Format, name: &str) -> Result<Vec<Polygon>> {
    match format {
        Format::Text => loctext::read(content, name),
        Format::Kml => lockml::read(content, name),
        Format::Gpx => locgpx::read(content, name),
        Format::GeoJson => locjson::read(content, name),
    }
}

pub fn read_path(path: &Path) -> Result<Vec<Polygon>> {
    let format = Format::from_path(path).ok_or_else(|| Error::UnsupportedFormat(path.into()))?;
    let content = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("polygon");
    let polygons = read_str(&content, format, name)?;
    if polygons.is_empty() {
        return Err(Error::NoPolygon(path.into()));
    }
    log::trace!("{}: {} polygon(s)", path.display(), polygons.len());
    Ok(polygons)
}

/// Every readable file below `root`, in path order.
pub fn input_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut ret = Vec::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && Format::from_path(entry.path()).is_some() {
            ret.push(entry.into_path());
        }
    }
    Ok(ret)
}

/// Reads a single file, or every supported file below a directory.
pub fn read_polygons(path: &Path) -> Result<Vec<Polygon>> {
    if !path.is_dir() {
        return read_path(path);
    }
    let mut ret = Vec::new();
    for file in input_files(path)? {
        match read_path(&file) {
            Ok(polygons) => ret.extend(polygons),
            Err(Error::NoPolygon(p)) => log::warn!("skipping {}: no polygon", p.display()),
            Err(e) => return Err(e),
        }
    }
    if ret.is_empty() {
        return Err(Error::NoPolygon(path.into()));
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "7.72007,4.41305\n7.72107, 4.41405\n\n7.72207,4.41305\n";

    const KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Folder>
      <Placemark>
        <name>farm</name>
        <Polygon>
          <outerBoundaryIs>
            <LinearRing>
              <coordinates>
                0,0,0 1,0,0 1,1,0 0,1,0 0,0,0
              </coordinates>
            </LinearRing>
          </outerBoundaryIs>
        </Polygon>
      </Placemark>
    </Folder>
  </Document>
</kml>"#;

    const GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>walk</name>
    <trkseg>
      <trkpt lat="6.8575" lon="7.3958"></trkpt>
      <trkpt lat="6.8581" lon="7.3971"></trkpt>
      <trkpt lat="6.8569" lon="7.3983"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    const GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "plot" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
      }
    },
    {
      "type": "Feature",
      "properties": {},
      "geometry": { "type": "Point", "coordinates": [3.0, 4.0] }
    },
    {
      "type": "Feature",
      "properties": {},
      "geometry": { "type": "LineString", "coordinates": [[4.41, 7.72], [4.42, 7.73]] }
    }
  ]
}"#;

    fn unit_square() -> Vec<Vertex> {
        vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(0.0, 1.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/b.KML")), Some(Format::Kml));
        assert_eq!(Format::from_path(Path::new("b.geojson")), Some(Format::GeoJson));
        assert_eq!(Format::from_path(Path::new("b.txt")), Some(Format::Text));
        assert_eq!(Format::from_path(Path::new("b.shp")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_text() {
        let polygons = read_str(TEXT, Format::Text, "markers").unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].name, "markers");
        assert_eq!(
            polygons[0].vertices,
            vec![
                Vertex::new(7.72007, 4.41305),
                Vertex::new(7.72107, 4.41405),
                Vertex::new(7.72207, 4.41305),
            ]
        );
        assert!(read_str("\n  \n", Format::Text, "empty").unwrap().is_empty());
    }

    #[test]
    fn test_text_bad_line() {
        match read_str("1,2\n40;30\n", Format::Text, "bad") {
            Err(Error::Coordinate { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "40;30");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            read_str("1,2,3", Format::Text, "bad"),
            Err(Error::Coordinate { line: 1, .. })
        ));
        assert!(matches!(
            read_str("abc,2", Format::Text, "bad"),
            Err(Error::Coordinate { line: 1, .. })
        ));
        assert!(matches!(
            read_str("95,2", Format::Text, "bad"),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_kml() {
        let polygons = read_str(KML, Format::Kml, "file").unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].name, "farm");
        assert_eq!(polygons[0].vertices, unit_square());
    }

    #[test]
    fn test_gpx() {
        let polygons = read_str(GPX, Format::Gpx, "file").unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].name, "walk");
        assert_eq!(polygons[0].vertices.len(), 3);
        assert_eq!(polygons[0].vertices[1], Vertex::new(6.8581, 7.3971));
    }

    #[test]
    fn test_geojson() {
        let polygons = read_str(GEOJSON, Format::GeoJson, "file").unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].name, "plot");
        assert_eq!(polygons[0].vertices, unit_square());
        assert_eq!(polygons[1].name, "file#2");
        assert_eq!(
            polygons[1].vertices,
            vec![Vertex::new(7.72, 4.41), Vertex::new(7.73, 4.42)]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            read_str("{ not json", Format::GeoJson, "x"),
            Err(Error::GeoJson(_))
        ));
        assert!(read_str("<gpx", Format::Gpx, "x").is_err());
    }

    #[test]
    fn test_read_path_unsupported() {
        assert!(matches!(
            read_path(Path::new("field.shp")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    struct TempDir(PathBuf);

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_read_directory() {
        let guard = TempDir(
            std::env::temp_dir().join(format!("polygon-measure-{}", std::process::id())),
        );
        let dir = &guard.0;
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("a.txt"), TEXT).unwrap();
        fs::write(dir.join("nested/b.geojson"), GEOJSON).unwrap();
        fs::write(dir.join("notes.md"), "ignored").unwrap();

        let files = input_files(dir).unwrap();
        assert_eq!(files.len(), 2);
        let polygons = read_polygons(dir).unwrap();
        assert_eq!(polygons.len(), 3);
        assert_eq!(polygons[0].name, "a");
    }

    #[test]
    fn test_kml_line_string() {
        let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2">
  <Placemark>
    <LineString>
      <coordinates>4.41,7.72 4.42,7.73 4.43,7.72</coordinates>
    </LineString>
  </Placemark>
</kml>"#;
        let polygons = read_str(kml, Format::Kml, "track").unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].name, "track");
        assert_eq!(
            polygons[0].vertices,
            vec![
                Vertex::new(7.72, 4.41),
                Vertex::new(7.73, 4.42),
                Vertex::new(7.72, 4.43),
            ]
        );
    }

    #[test]
    fn test_geojson_multipolygon_first_ring() {
        let json = r#"{
  "type": "MultiPolygon",
  "coordinates": [
    [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]],
    [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
  ]
}"#;
        let polygons = read_str(json, Format::GeoJson, "multi").unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].name, "multi");
        assert_eq!(polygons[0].vertices, unit_square());
    }

    #[test]
    fn test_geojson_single_feature() {
        let json = r#"{
  "type": "Feature",
  "properties": { "name": "one" },
  "geometry": {
    "type": "Polygon",
    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
  }
}"#;
        let polygons = read_str(json, Format::GeoJson, "file").unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].name, "one");
        assert_eq!(polygons[0].vertices, unit_square());

        let unnamed = json.replace(r#""name": "one""#, "");
        let polygons = read_str(&unnamed, Format::GeoJson, "file").unwrap();
        assert_eq!(polygons[0].name, "file");
    }

    #[test]
    fn test_geojson_bare_geometry() {
        let json = r#"{ "type": "LineString", "coordinates": [[4.41, 7.72], [4.42, 7.73]] }"#;
        let polygons = read_str(json, Format::GeoJson, "bare").unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].name, "bare");
        assert_eq!(
            polygons[0].vertices,
            vec![Vertex::new(7.72, 4.41), Vertex::new(7.73, 4.42)]
        );
        let point = r#"{ "type": "Point", "coordinates": [4.41, 7.72] }"#;
        assert!(read_str(point, Format::GeoJson, "bare").unwrap().is_empty());
    }

    #[test]
    fn test_gpx_route() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <rte>
    <rtept lat="7.72" lon="4.41"></rtept>
    <rtept lat="7.73" lon="4.42"></rtept>
  </rte>
</gpx>"#;
        let polygons = read_str(gpx, Format::Gpx, "g").unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].name, "g@route0");
        assert_eq!(
            polygons[0].vertices,
            vec![Vertex::new(7.72, 4.41), Vertex::new(7.73, 4.42)]
        );
    }

    #[test]
    fn test_gpx_segments_are_numbered() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>walk</name>
    <trkseg>
      <trkpt lat="6.8575" lon="7.3958"></trkpt>
      <trkpt lat="6.8581" lon="7.3971"></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="6.8569" lon="7.3983"></trkpt>
      <trkpt lat="6.8552" lon="7.3979"></trkpt>
    </trkseg>
  </trk>
  <trk>
    <trkseg>
      <trkpt lat="6.8549" lon="7.3962"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;
        let polygons = read_str(gpx, Format::Gpx, "g").unwrap();
        let names: Vec<&str> = polygons.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["walk/0", "walk/1", "g#1"]);
        assert_eq!(polygons[1].vertices[0], Vertex::new(6.8569, 7.3983));
    }
}
