use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::ReviewRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReviewRequest>,
) -> Result<String, ApiError> {
    let Some(code) = request.prompt() else {
        return Err(ApiError::bad_request("Prompt is required"));
    };

    tracing::info!(
        code_chars = code.chars().count(),
        model = %state.forwarder.model(),
        "Processing review request"
    );

    let review = state.forwarder.generate_content(code).await.map_err(|e| {
        tracing::error!(error = %e, "Review generation failed");
        ApiError::from(e)
    })?;

    Ok(review)
}
