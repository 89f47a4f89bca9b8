//! Player credential record and its external views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored player account, keyed by username in the credential store.
///
/// Records are created by registration and mutated by the login and
/// password-change paths; they are never physically deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub password_hash: String,
    pub chips: u64,
    pub games_played: u64,
    pub games_won: u64,
    pub games_lost: u64,
    pub games_drawn: u64,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub login_attempts: u32,
    pub locked_until: Option<DateTime<Utc>>,
}

impl PlayerRecord {
    pub fn new(password_hash: String, chips: u64) -> Self {
        Self {
            password_hash,
            chips,
            games_played: 0,
            games_won: 0,
            games_lost: 0,
            games_drawn: 0,
            created_at: Utc::now(),
            last_login: None,
            login_attempts: 0,
            locked_until: None,
        }
    }
}

/// Redacted view of a [`PlayerRecord`] handed to callers.
///
/// The password hash, attempt counter, and lock timestamp have no fields
/// here, so they can never leak through a profile read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub username: String,
    pub chips: u64,
    pub games_played: u64,
    pub games_won: u64,
    pub games_lost: u64,
    pub games_drawn: u64,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl PlayerProfile {
    pub fn from_record(username: &str, record: &PlayerRecord) -> Self {
        Self {
            username: username.to_string(),
            chips: record.chips,
            games_played: record.games_played,
            games_won: record.games_won,
            games_lost: record.games_lost,
            games_drawn: record.games_drawn,
            created_at: record.created_at,
            last_login: record.last_login,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        (self.games_won as f64 / self.games_played as f64 * 10_000.0).round() / 100.0
    }
}

/// Caller-driven update to a player record.
///
/// Only chip and game counters are expressible; `password_hash`,
/// `login_attempts`, `locked_until`, and `created_at` are mutated
/// exclusively by the login and password-change paths. Unknown keys in a
/// JSON update are dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub chips: Option<u64>,
    pub games_played: Option<u64>,
    pub games_won: Option<u64>,
    pub games_lost: Option<u64>,
    pub games_drawn: Option<u64>,
}

impl ProfileUpdate {
    pub fn apply(&self, record: &mut PlayerRecord) {
        if let Some(chips) = self.chips {
            record.chips = chips;
        }
        if let Some(played) = self.games_played {
            record.games_played = played;
        }
        if let Some(won) = self.games_won {
            record.games_won = won;
        }
        if let Some(lost) = self.games_lost {
            record.games_lost = lost;
        }
        if let Some(drawn) = self.games_drawn {
            record.games_drawn = drawn;
        }
    }
}
