use serde::Deserialize;

use crate::errors::AppError;

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Accepts `local@domain.tld`: one `@`, no whitespace, and a dotted domain
/// with no empty labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < NAME_MIN_CHARS {
            errors.push(format!(
                "name: Name must be at least {NAME_MIN_CHARS} characters."
            ));
        }
        if !is_valid_email(self.email.trim()) {
            errors.push("email: Please enter a valid email address.".to_string());
        }
        let message_chars = self.message.chars().count();
        if message_chars < MESSAGE_MIN_CHARS {
            errors.push(format!(
                "message: Message must be at least {MESSAGE_MIN_CHARS} characters."
            ));
        } else if message_chars > MESSAGE_MAX_CHARS {
            errors.push(format!(
                "message: Message must be less than {MESSAGE_MAX_CHARS} characters."
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors.join(" ")))
        }
    }
}
