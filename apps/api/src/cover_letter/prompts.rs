// Prompt text for cover-letter generation.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt: role plus the JSON-only output contract.
pub fn cover_letter_system() -> String {
    format!(
        "You are an expert at writing cover letters. {JSON_ONLY_SYSTEM} \
        Respond with exactly one JSON object of the form {{\"coverLetter\": \"<markdown>\"}}."
    )
}

pub fn cover_letter_prompt(
    job_description: &str,
    resume_information: &str,
    additional_instructions: Option<&str>,
) -> String {
    let additional = additional_instructions.unwrap_or("None provided.");
    format!(
        r#"You will be provided with a job description and resume information.

Job Description:
{job_description}

Resume Information:
{resume_information}

Additional Instructions:
{additional}

Using this information, write a cover letter tailored to the job description.
- Keep it professional and highlight the skills and experiences most relevant to the role.
- Keep it concise: no more than 3 paragraphs.
- Greet the hiring manager and sign off appropriately.
- Include the candidate's contact information.
- Do not write a generic letter; draw on the job description and resume information.
- The cover letter text itself must be markdown.

Return JSON: {{"coverLetter": "..."}}"#
    )
}
