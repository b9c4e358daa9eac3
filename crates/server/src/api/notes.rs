//! Note generation endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use studynotes_notes::GeneratedNotes;

use super::{notes_error, ApiError, ErrorResponse};
use crate::state::AppState;

/// Either already-extracted `text`, or a `filename` plus its UTF-8 `content`.
#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub text: Option<String>,
    pub filename: Option<String>,
    pub content: Option<String>,
}

pub async fn generate_notes(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
    payload: Result<Json<NotesRequest>, JsonRejection>,
) -> Result<Json<GeneratedNotes>, ApiError> {
    info!(file_id = %file_id, "notes requested");

    let Json(req) = payload.map_err(|rejection| {
        warn!(file_id = %file_id, error = %rejection.body_text(), "rejected note request body");
        (
            rejection.status(),
            Json(ErrorResponse {
                error: rejection.body_text(),
                retryable: false,
            }),
        )
    })?;

    let _slot = state.generation_slots.acquire().await.map_err(|_| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Server is shutting down.".into(),
                retryable: true,
            }),
        )
    })?;

    let result = match (req.text, req.filename, req.content) {
        (Some(text), _, _) => state.notes.notes_for_text(&file_id, &text).await,
        (None, Some(filename), Some(content)) => {
            state
                .notes
                .notes_for_document(&file_id, &filename, content.as_bytes())
                .await
        }
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Request must include 'text', or both 'filename' and 'content'.".into(),
                    retryable: false,
                }),
            ))
        }
    };

    result.map(Json).map_err(notes_error)
}
