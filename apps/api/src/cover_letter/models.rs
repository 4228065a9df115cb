use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Minimum length, in characters, of each required field.
pub const MIN_FIELD_CHARS: usize = 50;

/// Request body as received. Fields are optional on the wire so that a
/// missing field is reported as a validation error, not a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub resume_information: Option<String>,
    #[serde(default)]
    pub additional_instructions: Option<String>,
}

/// Validated generator input.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverLetterInput {
    pub job_description: String,
    pub resume_information: String,
    pub additional_instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterOutput {
    /// Markdown.
    pub cover_letter: String,
}

fn check_required(field: &str, label: &str, value: Option<&str>, errors: &mut Vec<String>) {
    match value {
        None => errors.push(format!("{field}: {label} is required.")),
        Some(v) if v.chars().count() < MIN_FIELD_CHARS => errors.push(format!(
            "{field}: {label} must be at least {MIN_FIELD_CHARS} characters."
        )),
        Some(_) => {}
    }
}

impl CoverLetterRequest {
    pub fn validate(self) -> Result<CoverLetterInput, AppError> {
        let mut errors = Vec::new();
        check_required(
            "jobDescription",
            "Job description",
            self.job_description.as_deref(),
            &mut errors,
        );
        check_required(
            "resumeInformation",
            "Resume information",
            self.resume_information.as_deref(),
            &mut errors,
        );

        match (self.job_description, self.resume_information) {
            (Some(job_description), Some(resume_information)) if errors.is_empty() => {
                Ok(CoverLetterInput {
                    job_description,
                    resume_information,
                    additional_instructions: self
                        .additional_instructions
                        .filter(|s| !s.trim().is_empty()),
                })
            }
            _ => Err(AppError::Validation(errors.join(" "))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long(prefix: &str) -> String {
        format!("{prefix} {}", "x".repeat(MIN_FIELD_CHARS))
    }

    #[test]
    fn test_valid_request_without_instructions() {
        let request = CoverLetterRequest {
            job_description: Some(long("Rust engineer")),
            resume_information: Some(long("Seven years of systems work")),
            additional_instructions: Some("   ".to_string()),
        };
        let input = request.validate().unwrap();
        assert!(input.additional_instructions.is_none());
    }

    #[test]
    fn test_missing_field_is_reported() {
        let request = CoverLetterRequest {
            job_description: Some(long("Rust engineer")),
            ..Default::default()
        };
        match request.validate() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("resumeInformation"));
                assert!(!msg.contains("jobDescription"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_short_fields_are_reported_together() {
        let request = CoverLetterRequest {
            job_description: Some("short".to_string()),
            resume_information: Some("also short".to_string()),
            additional_instructions: None,
        };
        let Err(AppError::Validation(msg)) = request.validate() else {
            panic!("expected validation error");
        };
        assert!(msg.contains("jobDescription"));
        assert!(msg.contains("resumeInformation"));
        assert!(msg.contains("at least 50 characters"));
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = serde_json::json!({
            "jobDescription": "jd",
            "resumeInformation": "ri"
        });
        let request: CoverLetterRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.job_description.as_deref(), Some("jd"));
        assert!(request.additional_instructions.is_none());
    }
}
