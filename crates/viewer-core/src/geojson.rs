//! Just enough GeoJSON to draw job outputs: documents are read into
//! features that keep their raw geometry next to a `geo` geometry.

use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, ViewerError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    fn bare(geometry: Value) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(key)
    }
}

type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeometryDef {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<GeometryDef> },
}

/// Flattens a GeoJSON document into its features.
///
/// Accepts a `FeatureCollection`, a single `Feature`, a bare geometry, or an
/// array of any of those.
pub fn read_features(document: Value) -> Result<Vec<Feature>> {
    if let Value::Array(items) = document {
        let mut features = Vec::new();
        for item in items {
            features.extend(read_features(item)?);
        }
        return Ok(features);
    }

    let kind = document
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("object has no \"type\""))?;

    match kind {
        "FeatureCollection" => {
            #[derive(Deserialize)]
            struct Collection {
                features: Vec<Feature>,
            }
            let collection: Collection = serde_json::from_value(document).map_err(invalid)?;
            Ok(collection.features)
        }
        "Feature" => {
            let feature: Feature = serde_json::from_value(document).map_err(invalid)?;
            Ok(vec![feature])
        }
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon"
        | "GeometryCollection" => Ok(vec![Feature::bare(document)]),
        other => Err(invalid(format!("unknown type \"{other}\""))),
    }
}

/// Converts a raw GeoJSON geometry object into a `geo` geometry.
pub fn to_geometry(raw: &Value) -> Result<Geometry<f64>> {
    let def: GeometryDef = serde_json::from_value(raw.clone()).map_err(invalid)?;
    convert(def)
}

fn convert(def: GeometryDef) -> Result<Geometry<f64>> {
    Ok(match def {
        GeometryDef::Point { coordinates } => Point::from(coord(&coordinates)?).into(),
        GeometryDef::MultiPoint { coordinates } => MultiPoint::new(
            coordinates
                .iter()
                .map(|p| coord(p).map(Point::from))
                .collect::<Result<_>>()?,
        )
        .into(),
        GeometryDef::LineString { coordinates } => line(&coordinates)?.into(),
        GeometryDef::MultiLineString { coordinates } => {
            MultiLineString::new(coordinates.iter().map(|l| line(l)).collect::<Result<_>>()?).into()
        }
        GeometryDef::Polygon { coordinates } => polygon(&coordinates)?.into(),
        GeometryDef::MultiPolygon { coordinates } => {
            MultiPolygon::new(coordinates.iter().map(|p| polygon(p)).collect::<Result<_>>()?).into()
        }
        GeometryDef::GeometryCollection { geometries } => {
            Geometry::GeometryCollection(GeometryCollection(
                geometries.into_iter().map(convert).collect::<Result<_>>()?,
            ))
        }
    })
}

fn coord(position: &[f64]) -> Result<Coord<f64>> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(invalid(format!(
            "position needs at least 2 numbers, got {}",
            position.len()
        ))),
    }
}

fn line(positions: &[Position]) -> Result<LineString<f64>> {
    Ok(LineString::new(positions.iter().map(|p| coord(p)).collect::<Result<_>>()?))
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|r| line(r));
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString::new(vec![]));
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn invalid(reason: impl ToString) -> ViewerError {
    ViewerError::InvalidGeoJson(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_feature_collection() {
        let features = read_features(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}, "properties": {"name": "a"}},
                {"type": "Feature", "geometry": null, "properties": null}
            ]
        }))
        .unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].property("name"), Some(&json!("a")));
        assert!(features[1].geometry.is_none());
        assert!(features[1].property("name").is_none());
    }

    #[test]
    fn reads_single_feature_bare_geometry_and_arrays() {
        let feature = json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}});
        let geometry = json!({"type": "LineString", "coordinates": [[0, 0], [1, 1]]});
        assert_eq!(read_features(feature.clone()).unwrap().len(), 1);
        assert_eq!(read_features(geometry.clone()).unwrap().len(), 1);
        assert_eq!(read_features(json!([feature, geometry])).unwrap().len(), 2);
    }

    #[test]
    fn rejects_untyped_and_unknown_documents() {
        assert!(matches!(read_features(json!({"features": []})), Err(ViewerError::InvalidGeoJson(_))));
        assert!(matches!(read_features(json!({"type": "Topology"})), Err(ViewerError::InvalidGeoJson(_))));
        assert!(matches!(read_features(json!(42)), Err(ViewerError::InvalidGeoJson(_))));
        assert!(matches!(
            read_features(json!({"type": "FeatureCollection"})),
            Err(ViewerError::InvalidGeoJson(_))
        ));
    }

    #[test]
    fn converts_polygon_with_hole() {
        let geometry = to_geometry(&json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                [[2, 2], [3, 2], [3, 3], [2, 2]]
            ]
        }))
        .unwrap();
        let Geometry::Polygon(poly) = geometry else {
            panic!("expected polygon");
        };
        assert_eq!(poly.exterior().0.len(), 5);
        assert_eq!(poly.interiors().len(), 1);
    }

    #[test]
    fn altitude_is_ignored_and_short_positions_fail() {
        let point = to_geometry(&json!({"type": "Point", "coordinates": [5.5, 6.5, 100.0]})).unwrap();
        assert_eq!(point, Geometry::Point(Point::new(5.5, 6.5)));

        let err = to_geometry(&json!({"type": "Point", "coordinates": [5.5]})).unwrap_err();
        assert!(err.to_string().contains("at least 2 numbers"));
    }

    #[test]
    fn converts_nested_collection() {
        let geometry = to_geometry(&json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "MultiPoint", "coordinates": [[0, 0], [1, 1]]},
                {"type": "MultiLineString", "coordinates": [[[0, 0], [2, 2]]]},
                {"type": "MultiPolygon", "coordinates": [[[[0, 0], [1, 0], [1, 1], [0, 0]]]]}
            ]
        }))
        .unwrap();
        let Geometry::GeometryCollection(collection) = geometry else {
            panic!("expected collection");
        };
        assert_eq!(collection.0.len(), 3);
    }
}
