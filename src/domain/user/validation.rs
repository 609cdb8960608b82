//! Validation rules for provisioned accounts
//!
//! Login input is never run through these: a login only needs non-empty
//! fields, and anything else is simply a credential mismatch.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("User ID must start and end with a letter or number")]
    InvalidIdBoundary,

    #[error("User ID contains invalid character: '{0}'")]
    InvalidIdCharacter(char),

    #[error("User ID cannot contain consecutive hyphens")]
    ConsecutiveHyphens,

    #[error("Username must be between {min} and {max} characters")]
    UsernameLength { min: usize, max: usize },

    #[error("Username contains invalid character: '{0}'")]
    InvalidUsernameCharacter(char),

    #[error("Password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },

    #[error("Unknown user status: {0}")]
    UnknownStatus(String),
}

const MAX_USER_ID_LENGTH: usize = 50;
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Alphanumeric + hyphens, starting and ending alphanumeric, no `--`
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    if let Some(c) = id.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        return Err(UserValidationError::InvalidIdCharacter(c));
    }

    if id.starts_with('-') || id.ends_with('-') {
        return Err(UserValidationError::InvalidIdBoundary);
    }

    if id.contains("--") {
        return Err(UserValidationError::ConsecutiveHyphens);
    }

    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&username.len()) {
        return Err(UserValidationError::UsernameLength {
            min: MIN_USERNAME_LENGTH,
            max: MAX_USERNAME_LENGTH,
        });
    }

    match username
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '-')
    {
        Some(c) => Err(UserValidationError::InvalidUsernameCharacter(c)),
        None => Ok(()),
    }
}

pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password.len()) {
        return Err(UserValidationError::PasswordLength {
            min: MIN_PASSWORD_LENGTH,
            max: MAX_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("alice").is_ok());
        assert!(validate_user_id("user-1").is_ok());
        assert!(validate_user_id("a").is_ok());
    }

    #[test]
    fn test_invalid_user_ids() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
        assert_eq!(
            validate_user_id(&"a".repeat(51)),
            Err(UserValidationError::IdTooLong(50))
        );
        assert_eq!(
            validate_user_id("-user"),
            Err(UserValidationError::InvalidIdBoundary)
        );
        assert_eq!(
            validate_user_id("user_name"),
            Err(UserValidationError::InvalidIdCharacter('_'))
        );
        assert_eq!(
            validate_user_id("user--name"),
            Err(UserValidationError::ConsecutiveHyphens)
        );
    }

    #[test]
    fn test_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("user_name-2").is_ok());
        assert!(matches!(
            validate_username("ab"),
            Err(UserValidationError::UsernameLength { min: 3, max: 50 })
        ));
        assert_eq!(
            validate_username("user@name"),
            Err(UserValidationError::InvalidUsernameCharacter('@'))
        );
    }

    #[test]
    fn test_passwords() {
        assert!(validate_password("correct-horse").is_ok());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
    }
}
