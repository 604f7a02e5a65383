use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::analysis::analyzer::analyze_resume;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub text: String,
}

/// POST /analyze-resume
///
/// Returns whatever JSON the model produced for the review prompt.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeResumeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    info!("Analyzing resume ({} chars)", request.text.chars().count());
    let analysis = analyze_resume(state.llm.as_ref(), &request.text).await?;
    Ok(Json(analysis))
}
