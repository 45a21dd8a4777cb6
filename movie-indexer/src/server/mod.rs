//! HTTP server setup and routing.

pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::IndexingError;
pub use state::AppState;

/// Create the Axum application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/movies/index", post(handlers::index_movies))
        .route("/movies/index/", post(handlers::index_movies))
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/search/", get(handlers::search_movies))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server on the specified address until ctrl-c.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), IndexingError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("- Index endpoint: http://{}/movies/index", addr);
    info!("- Search endpoint: http://{}/movies/search/", addr);
    info!("- Health endpoint: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
