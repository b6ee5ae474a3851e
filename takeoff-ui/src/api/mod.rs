//! HTTP API handlers for takeoff-ui

pub mod analyze;
pub mod auth;
pub mod health;
pub mod sheet;
pub mod ui;

pub use analyze::analyze_drawing;
pub use auth::{login, logout, register, session_middleware};
pub use health::health_routes;
pub use sheet::{export_markdown, get_sheet, put_sheet};
pub use ui::{serve_app_js, serve_index};
