//! Runtime configuration
//!
//! Loaded from `config.toml` in the data directory. Every field has a
//! default, so a missing file yields a fully usable configuration.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Chips granted to a freshly registered player
    #[serde(default = "default_starting_chips")]
    pub starting_chips: u64,
    /// Session lifetime in seconds
    #[serde(default = "default_session_secs")]
    pub session_secs: i64,
    /// Failed logins before the account is locked
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
    /// Lockout duration in seconds
    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: i64,
    /// Number of 52-card decks in the shoe
    #[serde(default = "default_shoe_decks")]
    pub shoe_decks: usize,
}

fn default_starting_chips() -> u64 {
    1000
}

fn default_session_secs() -> i64 {
    3600
}

fn default_max_login_attempts() -> u32 {
    5
}

fn default_lockout_secs() -> i64 {
    300
}

fn default_shoe_decks() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_chips: default_starting_chips(),
            session_secs: default_session_secs(),
            max_login_attempts: default_max_login_attempts(),
            lockout_secs: default_lockout_secs(),
            shoe_decks: default_shoe_decks(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist. A file that exists but fails to parse is an
    /// error; silently ignoring it would mask typos.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Per-user data directory holding the store, key, and config files.
pub fn default_data_dir() -> crate::error::Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "felt", "felt").ok_or_else(|| {
        crate::error::Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })?;
    Ok(dirs.data_dir().to_path_buf())
}
