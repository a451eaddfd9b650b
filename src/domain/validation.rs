//! Identifier validation shared by all entity IDs

use thiserror::Error;

use super::DomainError;

/// Errors that can occur when validating an entity identifier
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdValidationError {
    #[error("{0} ID cannot be empty")]
    Empty(&'static str),

    #[error("{0} ID exceeds maximum length of {1} characters")]
    TooLong(&'static str, usize),

    #[error("{0} ID must start with a letter or number")]
    InvalidStart(&'static str),

    #[error("{0} ID contains invalid character: '{1}'. Only alphanumeric characters, hyphens and underscores are allowed")]
    InvalidCharacter(&'static str, char),
}

impl From<IdValidationError> for DomainError {
    fn from(err: IdValidationError) -> Self {
        DomainError::invalid_id(err.to_string())
    }
}

pub const MAX_ID_LENGTH: usize = 64;

/// Validate an entity identifier
///
/// Rules:
/// - Cannot be empty
/// - Maximum 64 characters
/// - Only ASCII alphanumeric characters, hyphens and underscores
/// - Must start with an alphanumeric character
pub fn validate_id(kind: &'static str, id: &str) -> Result<(), IdValidationError> {
    let Some(first) = id.chars().next() else {
        return Err(IdValidationError::Empty(kind));
    };

    if id.len() > MAX_ID_LENGTH {
        return Err(IdValidationError::TooLong(kind, MAX_ID_LENGTH));
    }

    if !first.is_ascii_alphanumeric() {
        return Err(IdValidationError::InvalidStart(kind));
    }

    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(IdValidationError::InvalidCharacter(kind, c));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(validate_id("Project", "billing").is_ok());
        assert!(validate_id("Project", "billing-v2").is_ok());
        assert!(validate_id("Feature", "feat_01").is_ok());
        assert!(validate_id("Feature", "550e8400-e29b-41d4-a716-446655440000").is_ok());
    }

    #[test]
    fn test_empty_id() {
        assert_eq!(
            validate_id("Project", ""),
            Err(IdValidationError::Empty("Project"))
        );
    }

    #[test]
    fn test_too_long_id() {
        let id = "a".repeat(MAX_ID_LENGTH + 1);
        assert_eq!(
            validate_id("Feature", &id),
            Err(IdValidationError::TooLong("Feature", MAX_ID_LENGTH))
        );
    }

    #[test]
    fn test_invalid_start() {
        assert_eq!(
            validate_id("Feature", "-feat"),
            Err(IdValidationError::InvalidStart("Feature"))
        );
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            validate_id("Project", "bill ing"),
            Err(IdValidationError::InvalidCharacter("Project", ' '))
        );
        assert_eq!(
            validate_id("Project", "../etc"),
            Err(IdValidationError::InvalidStart("Project"))
        );
    }

    #[test]
    fn test_error_message_names_kind() {
        let err = validate_id("Feature", "").unwrap_err();
        assert_eq!(err.to_string(), "Feature ID cannot be empty");
    }
}
