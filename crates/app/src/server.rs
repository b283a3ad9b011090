//! HTTP server for the clicker

use std::sync::Arc;

use axum::Router;
use services::ProgressionService;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes;

/// Application state shared across handlers
pub struct AppState {
    pub progression: Arc<ProgressionService>,
}

impl AppState {
    pub fn new(progression: Arc<ProgressionService>) -> Self {
        Self { progression }
    }
}

/// Builds the router with all routes and the HTTP trace layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::progression_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Serve until the process is stopped.
pub async fn run(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await
}
