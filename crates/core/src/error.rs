//! Error types for Felt Core

use thiserror::Error;

use crate::auth::policy::PasswordIssue;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Username must be at least 3 characters long")]
    UsernameTooShort,

    #[error("Username can only contain letters, numbers, hyphens, and underscores")]
    UsernameInvalidChars,

    #[error("Username already exists")]
    UsernameTaken,

    #[error(transparent)]
    WeakPassword(#[from] PasswordIssue),

    /// Covers both unknown usernames and wrong passwords. The two cases are
    /// deliberately indistinguishable in the message to prevent username
    /// enumeration.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account locked. Try again in {remaining_secs} seconds")]
    AccountLocked { remaining_secs: i64 },

    #[error("Too many failed attempts. Account locked for {lockout_secs} seconds")]
    TooManyAttempts { lockout_secs: i64 },

    #[error("Session expired")]
    SessionExpired,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    /// The store file exists but could not be decrypted or parsed.
    /// Surfaced instead of being treated as an empty store, so callers can
    /// alert the user rather than silently dropping every account.
    #[error("Credential store is corrupt or unreadable: {0}")]
    StoreCorrupt(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
