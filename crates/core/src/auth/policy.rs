//! Username and password validation rules

use thiserror::Error;

use crate::error::{Error, Result};

/// Accepted special characters for the password policy.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// First violated password rule, in evaluation order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must contain at least one uppercase letter")]
    NoUppercase,
    #[error("Password must contain at least one lowercase letter")]
    NoLowercase,
    #[error("Password must contain at least one number")]
    NoDigit,
    #[error("Password must contain at least one special character")]
    NoSpecial,
}

/// Check a password against the policy. Rules are evaluated in order and
/// only the first violation is reported.
pub fn validate_password_strength(password: &str) -> std::result::Result<(), PasswordIssue> {
    if password.chars().count() < 8 {
        return Err(PasswordIssue::TooShort);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(PasswordIssue::NoUppercase);
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(PasswordIssue::NoLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordIssue::NoDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(PasswordIssue::NoSpecial);
    }
    Ok(())
}

/// Usernames: at least 3 characters, letters/digits/hyphen/underscore only.
pub fn validate_username(username: &str) -> Result<()> {
    if username.chars().count() < 3 {
        return Err(Error::UsernameTooShort);
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::UsernameInvalidChars);
    }
    Ok(())
}
