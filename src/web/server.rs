use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::web::{handlers, AppState};

pub async fn start_web_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // === INVENTORY ROUTES ===
        .route("/api/hosts", get(handlers::list_hosts))
        .route("/api/hosts", post(handlers::add_host))
        .route("/api/hosts/{host_name}", put(handlers::edit_host))
        .route("/api/hosts/{host_name}", delete(handlers::delete_host))
        // === STATUS ROUTES ===
        .route("/api/status", get(handlers::get_status))
        // === DAEMON ROUTES ===
        .route("/api/validate", get(handlers::validate_config))
        .route("/api/reload", post(handlers::reload_daemon))
        // === STATIC FILES ===
        .nest_service("/assets", ServeDir::new("ui/dist/assets"))
        // Add middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
