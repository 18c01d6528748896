use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("HTTP error! Status: {status}")]
    Fetch { status: u16 },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("bounds are not valid")]
    InvalidBounds,

    #[error("map widget error: {0}")]
    Widget(String),

    #[error("resource was already requested for this viewer")]
    AlreadyLoaded,

    #[error("invalid viewer config: {0}")]
    Config(#[source] serde_json::Error),
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
