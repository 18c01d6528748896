//! Page-independent parts of the job output map viewer.
//!
//! [`MapViewer`] owns a [`MapWidget`] and loads one GeoJSON document through
//! a [`ResourceFetcher`]; the browser crate supplies both.

pub mod config;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod layer;
pub mod params;
pub mod viewer;

pub use config::{ParamDefaults, TileLayerConfig, ViewerConfig};
pub use error::{Result, ViewerError};
pub use geometry::{LatLng, LatLngBounds};
pub use layer::{GeoJsonLayer, LayerFeature, Popup};
pub use params::QueryParams;
pub use viewer::{FetchResponse, LayerId, LoadState, MapViewer, MapWidget, ResourceFetcher};
