//! Felt Core Library
//!
//! Account management, encrypted credential storage, and the blackjack
//! game engine for the Felt client.

pub mod auth;
pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod storage;

pub use auth::policy::{validate_password_strength, PasswordIssue};
pub use auth::Authenticator;
pub use config::Config;
pub use error::{Error, Result};
pub use models::{PlayerProfile, PlayerRecord, ProfileUpdate, Session};
pub use storage::CredentialStore;
