use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::geometry::LatLng;

pub const DEFAULT_JOB_ID: &str = "dummy";
pub const DEFAULT_FILEBASE: &str = "units_gridded";
pub const DEFAULT_DOWNLOAD_PREFIX: &str = "download/out";

/// Raster base layer settings handed to the map library as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerConfig {
    pub url_template: String,
    pub subdomains: String,
    pub attribution: String,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: "abc".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamDefaults {
    pub job_id: String,
    pub filebase: String,
}

impl Default for ParamDefaults {
    fn default() -> Self {
        Self {
            job_id: DEFAULT_JOB_ID.to_string(),
            filebase: DEFAULT_FILEBASE.to_string(),
        }
    }
}

/// Everything the viewer needs to know about the page it runs in.
///
/// Every field has a default, so a page may override any subset of them
/// with a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    pub tiles: TileLayerConfig,
    pub download_prefix: String,
    pub defaults: ParamDefaults,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            center: LatLng::new(0.0, 0.0),
            zoom: 2,
            tiles: TileLayerConfig::default(),
            download_prefix: DEFAULT_DOWNLOAD_PREFIX.to_string(),
            defaults: ParamDefaults::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(ViewerError::Config)
    }
}
