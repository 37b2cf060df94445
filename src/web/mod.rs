//! Web layer module
//!
//! HTTP interface for the catalog. Handlers stay thin and delegate to the
//! source handler and generator; every JSON endpoint answers with the
//! [`ApiResponse`] envelope.
//!
//! # Routes
//!
//! - `GET /health`
//! - `POST /api/playlists/parse`
//! - `POST /api/playlists/generate`

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config, errors::AppError, generator::M3uGenerator, sources::M3uSourceHandler,
};

pub mod handlers;
pub mod responses;

pub use responses::{handle_error, ApiResponse};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, handler: M3uSourceHandler) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port)
            .parse()
            .map_err(|e| {
                AppError::configuration(format!(
                    "invalid listen address '{}:{}': {}",
                    config.web.host, config.web.port, e
                ))
            })?;
        let app = Self::create_router(AppState::new(config, handler));

        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        let max_request_size = state.config.web.max_request_size;

        Router::new()
            .route("/health", get(handlers::health::health_check))
            .nest("/api", Self::api_routes())
            // Middleware (applied in reverse order)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(max_request_size))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    fn api_routes() -> Router<AppState> {
        Router::new()
            .route("/playlists/parse", post(handlers::playlists::parse_playlist))
            .route(
                "/playlists/generate",
                post(handlers::playlists::generate_playlist),
            )
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Web server listening on http://{}", self.addr);
        axum::serve(listener, self.app).await?;
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

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub handler: Arc<M3uSourceHandler>,
    pub generator: M3uGenerator,
}

impl AppState {
    pub fn new(config: Config, handler: M3uSourceHandler) -> Self {
        Self {
            config: Arc::new(config),
            handler: Arc::new(handler),
            generator: M3uGenerator::new(),
        }
    }
}
