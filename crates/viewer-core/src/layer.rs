use geo::{BoundingRect, Geometry, Rect};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::geojson::{self, Feature};
use crate::geometry::LatLngBounds;

/// Popup markup bound to a single feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Popup(String);

impl Popup {
    /// `<strong>{name}</strong>`, with the name escaped.
    pub fn for_name(name: &str) -> Self {
        Self(format!("<strong>{}</strong>", htmlize::escape_text(name)))
    }

    pub fn html(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct LayerFeature {
    pub geometry: Value,
    pub shape: Geometry<f64>,
    pub popup: Option<Popup>,
}

/// A vector overlay built from one GeoJSON document.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonLayer {
    features: Vec<LayerFeature>,
}

impl GeoJsonLayer {
    pub fn parse(body: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(body)?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> Result<Self> {
        let mut features = Vec::new();
        for feature in geojson::read_features(document)? {
            // features without geometry are not drawn
            let Some(raw) = feature.geometry.clone() else {
                continue;
            };
            let shape = geojson::to_geometry(&raw)?;
            features.push(LayerFeature {
                popup: popup_for(&feature),
                geometry: raw,
                shape,
            });
        }
        Ok(Self { features })
    }

    pub fn features(&self) -> &[LayerFeature] {
        &self.features
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn popups(&self) -> impl Iterator<Item = &Popup> {
        self.features.iter().filter_map(|f| f.popup.as_ref())
    }

    /// Bounding box over every feature; `None` when nothing has coordinates.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.features
            .iter()
            .filter_map(|f| f.shape.bounding_rect())
            .reduce(union)
            .map(LatLngBounds::from)
    }

    /// Per-feature geometry and popup markup, in the shape the browser
    /// bindings draw from.
    pub fn to_render_payload(&self) -> Value {
        #[derive(Serialize)]
        struct Item<'a> {
            geometry: &'a Value,
            popup: Option<&'a Popup>,
        }

        let items: Vec<Item<'_>> = self
            .features
            .iter()
            .map(|f| Item {
                geometry: &f.geometry,
                popup: f.popup.as_ref(),
            })
            .collect();
        serde_json::json!(items)
    }
}

fn union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        geo::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        geo::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

/// Only truthy `name` values get a popup: non-empty strings, non-zero
/// numbers and `true`.
fn popup_for(feature: &Feature) -> Option<Popup> {
    let label = match feature.property("name")? {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()) => number_label(n),
        Value::Bool(true) => "true".to_string(),
        _ => return None,
    };
    Some(Popup::for_name(&label))
}

// `1.0` prints as `1`, the way a page template renders numbers.
fn number_label(n: &serde_json::Number) -> String {
    if n.is_f64() {
        n.as_f64().map(|v| v.to_string()).unwrap_or_else(|| n.to_string())
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;
    use crate::geometry::LatLng;
    use serde_json::json;

    #[test]
    fn named_feature_gets_bold_popup() {
        let layer = GeoJsonLayer::parse(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},"properties":{"name":"Alpha"}}
            ]}"#,
        )
        .unwrap();
        let popups: Vec<_> = layer.popups().collect();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].html(), "<strong>Alpha</strong>");
        assert!(popups[0].html().contains("Alpha"));
    }

    #[test]
    fn falsy_or_missing_names_get_no_popup() {
        let layer = GeoJsonLayer::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"name": ""}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"name": 0}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"name": null}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"UnitID": "x"}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"name": 7}}
            ]
        }))
        .unwrap();
        assert_eq!(layer.features().len(), 6);
        let popups: Vec<_> = layer.popups().map(Popup::html).collect();
        assert_eq!(popups, vec!["<strong>7</strong>"]);
    }

    #[test]
    fn numeric_names_drop_trailing_zero_fraction() {
        let layer = GeoJsonLayer::from_value(json!([
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"name": 1.0}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"name": 2.5}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"name": -3}}
        ]))
        .unwrap();
        let popups: Vec<_> = layer.popups().map(Popup::html).collect();
        assert_eq!(popups, vec!["<strong>1</strong>", "<strong>2.5</strong>", "<strong>-3</strong>"]);
    }

    #[test]
    fn popup_name_is_escaped() {
        assert_eq!(
            Popup::for_name("<b>A&B</b>").html(),
            "<strong>&lt;b&gt;A&amp;B&lt;/b&gt;</strong>"
        );
    }

    #[test]
    fn null_geometries_are_skipped() {
        let layer = GeoJsonLayer::from_value(json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "geometry": null, "properties": {"name": "ghost"}}]
        }))
        .unwrap();
        assert!(layer.is_empty());
        assert_eq!(layer.bounds(), None);
    }

    #[test]
    fn bounds_cover_all_features() {
        let layer = GeoJsonLayer::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [10.0, 54.5]}},
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[12.0, 55.0], [14.5, 56.25]]}},
                {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[11, 53], [13, 53], [13, 54], [11, 53]]]}}
            ]
        }))
        .unwrap();
        assert_eq!(
            layer.bounds(),
            Some(LatLngBounds::new(LatLng::new(53.0, 10.0), LatLng::new(56.25, 14.5)))
        );
    }

    #[test]
    fn not_json_is_a_json_error() {
        assert!(matches!(GeoJsonLayer::parse("<html>"), Err(ViewerError::Json(_))));
    }

    #[test]
    fn render_payload_pairs_geometry_and_popup() {
        let layer = GeoJsonLayer::from_value(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [1, 2]},
            "properties": {"name": "Alpha"}
        }))
        .unwrap();
        assert_eq!(
            layer.to_render_payload(),
            json!([{"geometry": {"type": "Point", "coordinates": [1, 2]}, "popup": "<strong>Alpha</strong>"}])
        );
    }
}
