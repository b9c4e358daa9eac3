//! API endpoint modules.

mod health;
mod notes;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use studynotes_notes::NotesError;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// True when the same request may succeed after a wait.
    pub retryable: bool,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a notes failure onto a user-facing status.
pub(crate) fn notes_error(err: NotesError) -> ApiError {
    let status = match &err {
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        NotesError::ServiceUnreachable(_)
        | NotesError::ServiceTimeout(_)
        | NotesError::ServiceRequestFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "note generation failed");
    } else {
        tracing::warn!(error = %err, "rejected note request");
    }
    (
        status,
        Json(ErrorResponse {
            retryable: err.is_transient(),
            error: err.to_string(),
        }),
    )
}

// ── Re-exports ───────────────────────────────────────────────────

pub use health::health;
pub use notes::generate_notes;
