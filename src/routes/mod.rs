//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API under `/api` and, when a frontend build directory is
//! configured, serves it as the fallback for every other path.

pub mod auth;
pub mod images;
pub mod status;
pub mod storage;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::theme::ThemeConfig;

/// API routes shared by the browser client and the styling build.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/images", get(images::get_images))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/status", get(status::get_status))
        .route("/api/status/navigating", put(status::set_navigating))
        .route("/api/storage/{bucket}/{*path}", put(storage::upload))
        .route("/api/theme", get(theme))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application router: API plus optional static frontend.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = api_routes(state);
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    };
    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// `GET /api/theme`: color, font and animation tokens for the styling build.
async fn theme() -> Json<ThemeConfig> {
    Json(ThemeConfig::standard())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
