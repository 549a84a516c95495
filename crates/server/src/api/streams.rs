//! Stream curation API handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use autostream_core::{sort_streams, SortMode, StreamCandidate, StreamRequest, UserOptions};

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurateRequest {
    /// `movie` or `series`.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Stremio id, e.g. `tt0944947:1:2`.
    pub id: String,
    #[serde(default)]
    pub streams: Vec<StreamCandidate>,
    /// Options as a JSON object.
    #[serde(default)]
    pub options: UserOptions,
    /// Options in the addon's `key=value|key=value` form. Keys in
    /// `options` take precedence.
    #[serde(default)]
    pub config: Option<String>,
    /// Rewrite display names; overrides the `beautify` option.
    #[serde(default)]
    pub beautify: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct CurateResponse {
    pub streams: Vec<StreamCandidate>,
    pub mode: SortMode,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/streams/curate
///
/// Sort or curate the given candidate streams.
pub async fn curate_streams(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CurateRequest>,
) -> Result<Json<CurateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = StreamRequest::parse(&body.content_type, &body.id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let options = body
        .config
        .as_deref()
        .map(UserOptions::parse)
        .unwrap_or_default()
        .merged_with(&body.options);
    let mode = SortMode::from_options(&options);
    let beautify = body
        .beautify
        .unwrap_or_else(|| options.flag("beautify", false));

    debug!(
        id = %body.id,
        mode = %mode,
        candidates = body.streams.len(),
        beautify,
        "Curating streams"
    );

    let mut streams = sort_streams(&body.streams, &options, &state.config().selection);
    if beautify {
        streams = state.curator().curate(streams, &request).await;
    }

    Ok(Json(CurateResponse { streams, mode }))
}
