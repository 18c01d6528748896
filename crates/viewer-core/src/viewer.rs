use std::fmt;

use crate::config::{TileLayerConfig, ViewerConfig};
use crate::error::{Result, ViewerError};
use crate::geometry::{LatLng, LatLngBounds};
use crate::layer::GeoJsonLayer;
use crate::params::QueryParams;

/// Handle to a layer owned by a map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// The rendering surface the viewer drives.
pub trait MapWidget {
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Tile failures are the widget's business and are never reported back.
    fn add_tile_layer(&mut self, tiles: &TileLayerConfig);

    fn add_geojson_layer(&mut self, layer: &GeoJsonLayer) -> Result<LayerId>;

    fn fit_bounds(&mut self, bounds: LatLngBounds) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a GET for a path relative to the page.
#[allow(async_fn_in_trait)]
pub trait ResourceFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Rendered(LayerId),
    Failed,
}

/// One page session: the widget, the settings it was built with and the
/// job output it shows.
pub struct MapViewer<W> {
    widget: W,
    config: ViewerConfig,
    params: QueryParams,
    state: LoadState,
}

impl<W: MapWidget> MapViewer<W> {
    /// Frames the default viewport and attaches the base tiles.
    pub fn new(mut widget: W, config: ViewerConfig, params: QueryParams) -> Self {
        widget.set_view(config.center, config.zoom);
        widget.add_tile_layer(&config.tiles);
        tracing::info!(
            filebase = %params.filebase,
            job_id = %params.job_id,
            "Will display {} of job {}",
            params.filebase,
            params.job_id
        );
        Self {
            widget,
            config,
            params,
            state: LoadState::Idle,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn resource_path(&self) -> String {
        self.params.resource_path(&self.config.download_prefix)
    }

    /// Fetches the job output and draws it. Only the first call does any
    /// work; later calls fail with [`ViewerError::AlreadyLoaded`].
    pub async fn load<F: ResourceFetcher>(&mut self, fetcher: &F) -> Result<LayerId> {
        if self.state != LoadState::Idle {
            return Err(ViewerError::AlreadyLoaded);
        }
        self.state = LoadState::Loading;

        match self.fetch_and_render(fetcher).await {
            Ok(id) => {
                self.state = LoadState::Rendered(id);
                Ok(id)
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Err(err)
            }
        }
    }

    /// [`load`](Self::load), with failures logged instead of returned.
    pub async fn run<F: ResourceFetcher>(&mut self, fetcher: &F) -> Option<LayerId> {
        self.run_with(fetcher, |err| {
            tracing::error!(error = %err, "Error loading the GeoJSON");
        })
        .await
    }

    pub async fn run_with<F, H>(&mut self, fetcher: &F, on_failure: H) -> Option<LayerId>
    where
        F: ResourceFetcher,
        H: FnOnce(&ViewerError),
    {
        match self.load(fetcher).await {
            Ok(id) => Some(id),
            Err(err) => {
                on_failure(&err);
                None
            }
        }
    }

    async fn fetch_and_render<F: ResourceFetcher>(&mut self, fetcher: &F) -> Result<LayerId> {
        let path = self.resource_path();
        let response = fetcher.fetch(&path).await?;
        if !response.is_success() {
            return Err(ViewerError::Fetch {
                status: response.status,
            });
        }
        tracing::info!(%path, bytes = response.body.len(), "Data retrieved...");

        let layer = GeoJsonLayer::parse(&response.body)?;
        let id = self.widget.add_geojson_layer(&layer)?;
        tracing::debug!(%id, features = layer.features().len(), "GeoJSON layer added");

        let bounds = layer.bounds().ok_or(ViewerError::InvalidBounds)?;
        self.widget.fit_bounds(bounds)?;
        Ok(id)
    }
}
