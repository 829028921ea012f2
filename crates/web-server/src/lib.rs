// In crates/web-server/src/lib.rs

use app_config::types::ServerSettings;
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use core_types::Notification;
use database::Db;
use tokio::net::TcpListener;
use types::{Page, PageQuery};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
}

/// Creates the main application router with all routes and middleware.
///
/// # Arguments
///
/// * `app_state`: The shared `AppState` containing resources like the DB pool.
///
/// # Returns
///
/// The configured `axum::Router`.
pub fn create_router(app_state: AppState) -> Router {
    // Define a CORS layer to allow requests from the dashboard.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    // Define the API sub-router
    let api_router = Router::new().route("/notifications", get(get_notifications_handler));

    // The main router.
    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /api/notifications`.
/// Fetches a page of crossover notifications, newest first.
async fn get_notifications_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Notification>>> {
    query.validate().map_err(Error::BadRequest)?;

    let (notifications, total_items) = state
        .db
        .get_notifications_paginated(query.page, query.page_size)
        .await?;

    Ok(Json(Page::new(notifications, total_items, &query)))
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router.
/// It will run forever until the process is terminated.
pub async fn run(settings: ServerSettings, db: Db) -> Result<()> {
    let app = create_router(AppState { db });

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on {}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)?;

    Ok(())
}
