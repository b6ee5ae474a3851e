//! Registration, login, and session middleware
//!
//! Sessions are bearer tokens issued at login and stored in the sessions
//! table. Protected routes receive the authenticated [`SessionContext`] as a
//! request extension.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::sessions;
use crate::db::users::{self, RegisterOutcome};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Credentials payload for register and login
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Authenticated session attached to protected requests
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// POST /api/register
///
/// A duplicate username is reported as a conflict; the stored record is not
/// altered.
pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<RegisterResponse>> {
    let username = credentials.username.trim();
    if username.is_empty() || credentials.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    match users::insert_user(&state.db, username, &credentials.password).await? {
        RegisterOutcome::Created => {
            info!(username = %username, "Registered new user");
            Ok(Json(RegisterResponse {
                username: username.to_string(),
            }))
        }
        RegisterOutcome::AlreadyExists => {
            Err(ApiError::Conflict("Username already exists".to_string()))
        }
    }
}

/// POST /api/login
///
/// Unknown user and wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<LoginResponse>> {
    let username = credentials.username.trim();

    match users::verify_user(&state.db, username, &credentials.password).await? {
        Some(username) => {
            let token = sessions::create_session(&state.db, &username).await?;
            info!(username = %username, "User logged in");
            Ok(Json(LoginResponse { token, username }))
        }
        None => Err(ApiError::Unauthorized("Incorrect credentials".to_string())),
    }
}

/// POST /api/logout
///
/// Deletes the session row and drops the session's sheet buffer.
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Json<serde_json::Value>> {
    sessions::delete_session(&state.db, &session.token).await?;
    state.sheets.remove(&session.token);

    info!(username = %session.username, "User logged out");
    Ok(Json(serde_json::json!({ "status": "logged_out" })))
}

/// Session middleware for protected routes
///
/// Expects `Authorization: Bearer <token>`; resolves the token against the
/// sessions table and attaches a [`SessionContext`] to the request. Returns
/// 401 when the header is missing or the session is unknown.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Unauthorized("Missing session token".to_string()))?;

    let username = sessions::lookup_session(&state.db, &token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".to_string()))?;

    request
        .extensions_mut()
        .insert(SessionContext { token, username });

    Ok(next.run(request).await)
}
