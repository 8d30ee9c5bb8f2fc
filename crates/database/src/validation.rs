//! Input validation for stored prompt fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for a user question.
pub const MAX_QUESTION_LENGTH: usize = 8000;

/// Maximum allowed length for an optimized prompt.
pub const MAX_OPTIMIZED_LENGTH: usize = 32000;

/// Maximum allowed length for user display names.
pub const MAX_NAME_LENGTH: usize = 64;

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }

    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }

    Ok(())
}

/// Validate a user's original question.
pub fn validate_question(question: &str) -> Result<(), ValidationError> {
    validate_text("question", question, MAX_QUESTION_LENGTH)
}

/// Validate an optimized prompt before it is attached.
pub fn validate_optimized_prompt(prompt: &str) -> Result<(), ValidationError> {
    validate_text("optimized prompt", prompt, MAX_OPTIMIZED_LENGTH)
}

/// Validate a user display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    validate_text("name", name, MAX_NAME_LENGTH)
}
