//! Sheet viewing, editing, and export
//!
//! The editable grid round trip: the client fetches the current sheet, edits
//! cells or rows, and PUTs the whole sheet back.

use axum::{extract::State, http::header, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};

use takeoff_common::Sheet;

use crate::api::auth::SessionContext;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SheetResponse {
    pub sheet: Option<Sheet>,
}

/// Edited sheet payload; rows are normalized to the column count on receipt
#[derive(Debug, Deserialize)]
pub struct SheetUpdate {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// GET /api/sheet
pub async fn get_sheet(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Json<SheetResponse> {
    Json(SheetResponse {
        sheet: state.sheets.get(&session.token),
    })
}

/// PUT /api/sheet
///
/// Replaces the session's sheet with the edited one.
pub async fn put_sheet(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(update): Json<SheetUpdate>,
) -> ApiResult<Json<SheetResponse>> {
    if update.columns.is_empty() {
        return Err(ApiError::BadRequest(
            "Sheet must have at least one column".to_string(),
        ));
    }

    let sheet = Sheet::new(update.columns, update.rows);
    state.sheets.replace(&session.token, sheet.clone());

    Ok(Json(SheetResponse { sheet: Some(sheet) }))
}

/// GET /api/sheet/markdown
///
/// The current sheet rendered as a markdown pipe table.
pub async fn export_markdown(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<impl IntoResponse> {
    let sheet = state
        .sheets
        .get(&session.token)
        .ok_or_else(|| ApiError::NotFound("No sheet for this session".to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        sheet.to_markdown(),
    ))
}
