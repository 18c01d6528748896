#![cfg(feature = "ssr")]

//! Static server for the viewer page and the job output directory.
//! Processing jobs write their files under `download_dir`; this only
//! exposes them.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Deserialize;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const CONFIG_ENV: &str = "AQUAINFRA_CONFIG_FILE";
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub download_dir: PathBuf,
    #[serde(default = "default_site_root")]
    pub site_root: PathBuf,
    #[serde(default = "default_addr")]
    pub addr: SocketAddr,
}

fn default_site_root() -> PathBuf {
    PathBuf::from("target/site")
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

impl ServerConfig {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        #[derive(Deserialize)]
        struct Raw {
            download_dir: String,
            site_root: Option<PathBuf>,
            addr: Option<SocketAddr>,
        }

        let raw: Raw = serde_json::from_str(raw).context("parsing server config")?;
        let trimmed = raw.download_dir.trim_end_matches('/');
        let download_dir = if trimmed.is_empty() && !raw.download_dir.is_empty() {
            PathBuf::from("/")
        } else {
            PathBuf::from(trimmed)
        };
        anyhow::ensure!(!download_dir.as_os_str().is_empty(), "download_dir must not be empty");

        Ok(Self {
            download_dir,
            site_root: raw.site_root.unwrap_or_else(default_site_root),
            addr: raw.addr.unwrap_or_else(default_addr),
        })
    }

    /// Reads the file named by `AQUAINFRA_CONFIG_FILE`, or `./config.json`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
        Self::from_json(&raw)
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest_service("/download", ServeDir::new(&config.download_dir))
        .fallback_service(ServeDir::new(&config.site_root))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load()?;
    let app = router(&config);

    tracing::info!(
        addr = %config.addr,
        download_dir = %config.download_dir.display(),
        site_root = %config.site_root.display(),
        "map server started"
    );

    axum::serve(tokio::net::TcpListener::bind(config.addr).await?, app).await?;
    Ok(())
}
