//! Kith API Server library
//!
//! HTTP surface over the friendship graph in `kith-core`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use state::AppState;

use std::time::Duration;

use axum::Router;

/// Build the application router for the given state.
pub fn app(state: AppState) -> Router {
    use tower_http::catch_panic::CatchPanicLayer;
    use tower_http::cors::CorsLayer;
    use tower_http::timeout::TimeoutLayer;
    use tower_http::trace::TraceLayer;

    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .nest("/api/v1", handlers::routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive()) // TODO: Configure properly
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Kith API server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    use std::net::SocketAddr;

    tracing::info!("Starting Kith API Server on {}", config.bind_address);

    // Create app state
    let state = AppState::new(config.clone()).await?;

    // Build router
    let app = app(state);

    // Parse address
    let addr: SocketAddr = config.bind_address.parse()?;

    // Start server, draining in-flight requests on shutdown
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
