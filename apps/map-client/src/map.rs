use viewer_core::{GeoJsonLayer, LatLng, LatLngBounds, LayerId, MapWidget, Result, TileLayerConfig, ViewerError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(inline_js = r#"
export function createMap(containerId) {
  if (!window.L) {
    console.warn('Leaflet not loaded. Add leaflet.js to the page before the viewer.');
    return null;
  }
  return window.L.map(containerId);
}

export function setView(map, lat, lng, zoom) {
  map.setView([lat, lng], zoom);
}

export function addTileLayer(map, urlTemplate, subdomains, attribution) {
  window.L.tileLayer(urlTemplate, { subdomains, attribution }).addTo(map);
}

export function addGeoJsonLayer(map, itemsJson) {
  const group = window.L.featureGroup();
  for (const item of JSON.parse(itemsJson)) {
    const layer = window.L.geoJSON(item.geometry);
    if (item.popup) {
      layer.bindPopup(item.popup);
    }
    group.addLayer(layer);
  }
  group.addTo(map);
  return window.L.stamp(group);
}

export function fitBounds(map, south, west, north, east) {
  map.fitBounds([[south, west], [north, east]]);
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = createMap)]
    fn create_map(container_id: &str) -> JsValue;

    #[wasm_bindgen(js_name = setView)]
    fn set_view(map: &JsValue, lat: f64, lng: f64, zoom: u8);

    #[wasm_bindgen(js_name = addTileLayer)]
    fn add_tile_layer(map: &JsValue, url_template: &str, subdomains: &str, attribution: &str);

    #[wasm_bindgen(catch, js_name = addGeoJsonLayer)]
    fn add_geojson_layer(map: &JsValue, items_json: &str) -> std::result::Result<u32, JsValue>;

    #[wasm_bindgen(catch, js_name = fitBounds)]
    fn fit_bounds(map: &JsValue, south: f64, west: f64, north: f64, east: f64) -> std::result::Result<(), JsValue>;
}

/// A Leaflet `L.Map` bound to a DOM container.
pub struct LeafletMap {
    handle: JsValue,
}

impl LeafletMap {
    pub fn mount(container_id: &str) -> Result<Self> {
        let handle = create_map(container_id);
        if handle.is_null() || handle.is_undefined() {
            return Err(ViewerError::Widget("Leaflet is not available".to_string()));
        }
        Ok(Self { handle })
    }
}

impl MapWidget for LeafletMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        set_view(&self.handle, center.lat, center.lng, zoom);
    }

    fn add_tile_layer(&mut self, tiles: &TileLayerConfig) {
        add_tile_layer(&self.handle, &tiles.url_template, &tiles.subdomains, &tiles.attribution);
    }

    fn add_geojson_layer(&mut self, layer: &GeoJsonLayer) -> Result<LayerId> {
        let items = layer.to_render_payload().to_string();
        add_geojson_layer(&self.handle, &items)
            .map(LayerId)
            .map_err(widget_error)
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) -> Result<()> {
        let [[south, west], [north, east]] = bounds.to_corners();
        fit_bounds(&self.handle, south, west, north, east).map_err(widget_error)
    }
}

fn widget_error(err: JsValue) -> ViewerError {
    let message = match err.dyn_ref::<js_sys::Error>() {
        Some(e) => String::from(e.message()),
        None => format!("{err:?}"),
    };
    ViewerError::Widget(message)
}
