use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub parsed_resume: Value,
}

/// GET /parse-resume
pub async fn handle_parse_resume(
    State(state): State<AppState>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let parsed_resume = state.pipeline.run().await?;
    Ok(Json(ParseResumeResponse { parsed_resume }))
}
