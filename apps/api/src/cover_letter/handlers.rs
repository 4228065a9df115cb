//! Axum route handlers for the Cover Letter API.

use axum::{extract::State, Json};
use tracing::info;

use crate::cover_letter::generator::generate_cover_letter;
use crate::cover_letter::models::{CoverLetterOutput, CoverLetterRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/cover-letter
///
/// Validates before any LLM call. On generation failure the client gets a
/// generic error and keeps its form input for a retry.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterOutput>, AppError> {
    let input = request.validate()?;

    info!(
        "Generating cover letter: jd_chars={}, resume_chars={}, has_instructions={}",
        input.job_description.chars().count(),
        input.resume_information.chars().count(),
        input.additional_instructions.is_some()
    );

    let output = generate_cover_letter(&state.llm, &input).await?;
    Ok(Json(output))
}
