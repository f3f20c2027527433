//! Web layer module
//!
//! Thin axum handlers over the catalog source and the output generators.
//! Everything a handler needs is built once into [`AppState`] from the
//! loaded [`Config`]; handlers never read the process environment.

use anyhow::Result;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    errors::AppResult,
    proxy::{EpgGenerator, M3uGenerator, StreamListGenerator},
    sources::{CatalogClient, CatalogSource, HttpCatalogClient},
};

pub mod handlers;

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let state = AppState::new(config)?;

        Ok(Self {
            app: Self::router(state),
            addr,
        })
    }

    /// Create the router with all routes and middleware
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health::health_check))
            .route("/api/m3u", get(handlers::playlist::serve_playlist))
            .route("/api/xmltv", get(handlers::guide::serve_guide))
            .route("/api/streams", get(handlers::streams::serve_stream_list))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: CatalogSource,
    pub m3u: Arc<M3uGenerator>,
    pub epg: Arc<EpgGenerator>,
    pub streams: Arc<StreamListGenerator>,
}

impl AppState {
    /// Build state backed by the reqwest catalog client
    pub fn new(config: Config) -> AppResult<Self> {
        let client = HttpCatalogClient::from_config(&config.upstream)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: Config, client: Arc<dyn CatalogClient>) -> Self {
        let fields = config.fields.resolve();
        Self {
            catalog: CatalogSource::new(client),
            m3u: Arc::new(M3uGenerator::new(&config.playlist, fields)),
            epg: Arc::new(EpgGenerator::new(&config.guide, fields)),
            streams: Arc::new(StreamListGenerator::new(fields)),
            config: Arc::new(config),
        }
    }
}
