//! takeoff-ui library - drawing takeoff web service
//!
//! Exposes the application state and router so integration tests can drive
//! the service without binding a socket.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

use crate::services::gemini::GeminiClient;
use crate::sheets::SheetStore;

pub mod api;
pub mod db;
pub mod error;
pub mod services;
pub mod sheets;

/// Upload cap for drawing bodies (20 MB)
pub const MAX_DRAWING_BYTES: usize = 20 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (users + sessions)
    pub db: SqlitePool,
    /// Client for the external drawing-analysis model
    pub gemini: Arc<GeminiClient>,
    /// Per-session quantity sheet buffers (in-memory only)
    pub sheets: SheetStore,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, gemini: GeminiClient) -> Self {
        Self {
            db,
            gemini: Arc::new(gemini),
            sheets: SheetStore::new(),
        }
    }
}

/// Build application router
///
/// Protected routes require a bearer session token; the health endpoint,
/// registration, login, and the static page are public.
pub fn build_router(state: AppState) -> Router {
    use axum::extract::DefaultBodyLimit;
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require a live session)
    let protected = Router::new()
        .route("/api/analyze", post(api::analyze_drawing))
        .route("/api/sheet", get(api::get_sheet).put(api::put_sheet))
        .route("/api/sheet/markdown", get(api::export_markdown))
        .route("/api/logout", post(api::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::session_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_DRAWING_BYTES));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/register", post(api::register))
        .route("/api/login", post(api::login))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
