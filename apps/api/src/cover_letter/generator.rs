//! Cover Letter Generator — one structured prompt round trip.
//!
//! Any upstream failure (transport, provider error, malformed output, empty
//! letter) becomes `AppError::Llm`; there is never a partial result.

use tracing::info;

use crate::cover_letter::models::{CoverLetterInput, CoverLetterOutput};
use crate::cover_letter::prompts::{cover_letter_prompt, cover_letter_system};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

pub async fn generate_cover_letter(
    llm: &LlmClient,
    input: &CoverLetterInput,
) -> Result<CoverLetterOutput, AppError> {
    let prompt = cover_letter_prompt(
        &input.job_description,
        &input.resume_information,
        input.additional_instructions.as_deref(),
    );

    let output: CoverLetterOutput = llm
        .call_json(&prompt, &cover_letter_system())
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter LLM call failed: {e}")))?;

    if output.cover_letter.trim().is_empty() {
        return Err(AppError::Llm(
            "Cover letter LLM call returned an empty letter".to_string(),
        ));
    }

    info!(
        "Generated cover letter ({} chars)",
        output.cover_letter.chars().count()
    );
    Ok(output)
}
