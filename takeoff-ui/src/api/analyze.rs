//! Drawing analysis endpoint
//!
//! Accepts raw drawing bytes, forwards them to the model with the takeoff
//! prompt, and parses the markdown-table reply into the session's sheet.

use axum::{body::Bytes, extract::State, Extension, Json};
use serde::Serialize;
use tracing::warn;

use takeoff_common::sheet::{parse_markdown_table, Sheet};

use crate::api::auth::SessionContext;
use crate::error::{ApiError, ApiResult};
use crate::services::drawing::DrawingFormat;
use crate::AppState;

/// Analysis result: a parsed sheet, or a warning explaining why none was
/// produced. Upstream call failures are reported as error responses instead.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub sheet: Option<Sheet>,
    pub warning: Option<String>,
}

/// POST /api/analyze
///
/// A successful parse replaces the session's sheet buffer; a model reply
/// without a usable table leaves the buffer unchanged.
pub async fn analyze_drawing(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    body: Bytes,
) -> ApiResult<Json<AnalyzeResponse>> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Empty request body".to_string()));
    }

    let format = DrawingFormat::detect(&body).ok_or_else(|| {
        ApiError::BadRequest("Unsupported drawing format (expected PDF, JPEG, or PNG)".to_string())
    })?;

    let text = state
        .gemini
        .analyze_drawing(format.mime_type(), &body)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    match parse_markdown_table(&text) {
        Some(sheet) if !sheet.is_empty() => {
            state.sheets.replace(&session.token, sheet.clone());
            Ok(Json(AnalyzeResponse {
                sheet: Some(sheet),
                warning: None,
            }))
        }
        Some(_) => {
            warn!(username = %session.username, "Model table contained no rows");
            Ok(Json(AnalyzeResponse {
                sheet: None,
                warning: Some("No structural elements detected in the drawing".to_string()),
            }))
        }
        None => {
            warn!(username = %session.username, "Model replied without a markdown table");
            Ok(Json(AnalyzeResponse {
                sheet: None,
                warning: Some("Model responded but no markdown table was found".to_string()),
            }))
        }
    }
}
