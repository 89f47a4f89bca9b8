//! Authentication and account management
//!
//! [`Authenticator`] wraps the encrypted credential store with registration,
//! login (with lockout), session issuance, profile access, password change,
//! and the one-time legacy import. Everything is synchronous; argon2
//! hashing dominates latency, so interactive callers should expect
//! multi-hundred-millisecond pauses on login and registration.

pub mod policy;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{PlayerProfile, PlayerRecord, ProfileUpdate, Session};
use crate::storage::{read_legacy_store, CredentialStore};

/// Credential manager for a single local store.
///
/// Holds the decrypted player map in memory; every mutation re-encrypts and
/// rewrites the whole store file. Sessions are issued to the caller and
/// passed back explicitly; the authenticator itself keeps no notion of a
/// "current user".
pub struct Authenticator {
    config: Config,
    store: CredentialStore,
    players: BTreeMap<String, PlayerRecord>,
    /// Lowercased username -> canonical username, for case-insensitive
    /// lookup without scanning the whole map.
    index: HashMap<String, String>,
}

impl Authenticator {
    /// Open the store under `data_dir` and load all records.
    ///
    /// Fails with [`Error::StoreCorrupt`] if the store exists but cannot be
    /// decrypted; callers should surface that to the user instead of
    /// continuing with what would look like zero accounts.
    #[instrument(skip(data_dir, config), fields(dir = %data_dir.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(data_dir: P, config: Config) -> Result<Self> {
        let store = CredentialStore::open(data_dir)?;
        let players = store.load()?;
        let index = players
            .keys()
            .map(|name| (name.to_lowercase(), name.clone()))
            .collect();
        info!(players = players.len(), "credential store loaded");
        Ok(Self {
            config,
            store,
            players,
            index,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register a new player with the configured starting chips.
    #[instrument(skip(self, password))]
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        policy::validate_username(username)?;
        policy::validate_password_strength(password)?;

        if self.index.contains_key(&username.to_lowercase()) {
            return Err(Error::UsernameTaken);
        }

        let hash = hash_password(password)?;
        let record = PlayerRecord::new(hash, self.config.starting_chips);
        self.index
            .insert(username.to_lowercase(), username.to_string());
        self.players.insert(username.to_string(), record);
        self.persist()?;

        info!(username, "player registered");
        Ok(())
    }

    /// Attempt a login and issue a session on success.
    ///
    /// Unknown usernames and wrong passwords both map to the same generic
    /// [`Error::InvalidCredentials`]. A locked account is refused without
    /// touching the attempt counter; reaching the attempt threshold locks
    /// the account for the configured duration.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let canonical = self
            .index
            .get(&username.to_lowercase())
            .cloned()
            .ok_or(Error::InvalidCredentials)?;

        let now = Utc::now();
        let record = self
            .players
            .get(&canonical)
            .ok_or(Error::InvalidCredentials)?;

        if let Some(until) = record.locked_until {
            if now < until {
                return Err(Error::AccountLocked {
                    remaining_secs: (until - now).num_seconds(),
                });
            }
        }

        if !verify_password(password, &record.password_hash)? {
            let lockout_secs = self.config.lockout_secs;
            let threshold = self.config.max_login_attempts;
            let locked = {
                let record = self
                    .players
                    .get_mut(&canonical)
                    .ok_or(Error::InvalidCredentials)?;
                record.login_attempts += 1;
                if record.login_attempts >= threshold {
                    record.locked_until = Some(now + Duration::seconds(lockout_secs));
                    true
                } else {
                    false
                }
            };
            self.persist()?;
            if locked {
                warn!(username = %canonical, "account locked after repeated failures");
                return Err(Error::TooManyAttempts { lockout_secs });
            }
            return Err(Error::InvalidCredentials);
        }

        {
            let record = self
                .players
                .get_mut(&canonical)
                .ok_or(Error::InvalidCredentials)?;
            record.login_attempts = 0;
            record.locked_until = None;
            record.last_login = Some(now);
        }
        self.persist()?;

        info!(username = %canonical, "login successful");
        Ok(Session::issue(&canonical, self.config.session_secs))
    }

    /// Invalidate a session unconditionally.
    pub fn logout(&self, session: &mut Session) {
        session.revoke();
    }

    /// Extend a still-valid session by the configured duration.
    pub fn refresh_session(&self, session: &mut Session) -> bool {
        session.refresh(self.config.session_secs)
    }

    /// Redacted profile for the session's player.
    pub fn profile(&self, session: &Session) -> Result<PlayerProfile> {
        if !session.is_valid() {
            return Err(Error::SessionExpired);
        }
        let record = self
            .players
            .get(session.username())
            .ok_or_else(|| Error::PlayerNotFound(session.username().to_string()))?;
        Ok(PlayerProfile::from_record(session.username(), record))
    }

    /// Apply a chip/stat update for the session's player and persist.
    pub fn update_profile(&mut self, session: &Session, update: &ProfileUpdate) -> Result<()> {
        if !session.is_valid() {
            return Err(Error::SessionExpired);
        }
        let record = self
            .players
            .get_mut(session.username())
            .ok_or_else(|| Error::PlayerNotFound(session.username().to_string()))?;
        update.apply(record);
        self.persist()
    }

    /// Replace the password after verifying the old one.
    #[instrument(skip(self, session, old_password, new_password))]
    pub fn change_password(
        &mut self,
        session: &Session,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if !session.is_valid() {
            return Err(Error::SessionExpired);
        }

        let current_hash = self
            .players
            .get(session.username())
            .map(|r| r.password_hash.clone())
            .ok_or_else(|| Error::PlayerNotFound(session.username().to_string()))?;

        if !verify_password(old_password, &current_hash)? {
            return Err(Error::WrongPassword);
        }
        policy::validate_password_strength(new_password)?;

        let hash = hash_password(new_password)?;
        if let Some(record) = self.players.get_mut(session.username()) {
            record.password_hash = hash;
        }
        self.persist()?;

        info!(username = %session.username(), "password changed");
        Ok(())
    }

    /// One-time import from the legacy plaintext store.
    ///
    /// Every legacy username not already present (case-insensitively) gets
    /// its cleartext password hashed and an equivalent record created.
    /// `created_at` is the migration time, not the original creation time.
    /// Returns how many records were imported; running the import again is
    /// a no-op. Retiring the legacy file is the caller's responsibility.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_legacy<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let legacy = read_legacy_store(path)?;
        let mut migrated = 0;

        for (username, old) in legacy {
            if self.index.contains_key(&username.to_lowercase()) {
                continue;
            }

            let hash = hash_password(&old.password)?;
            let mut record =
                PlayerRecord::new(hash, old.chips.unwrap_or(self.config.starting_chips));
            record.games_played = old.games_played;
            record.games_won = old.games_won;
            record.games_lost = old.games_lost;
            record.games_drawn = old.games_drawn;

            self.index.insert(username.to_lowercase(), username.clone());
            self.players.insert(username, record);
            migrated += 1;
        }

        self.persist()?;
        info!(migrated, "legacy store imported");
        Ok(migrated)
    }

    /// Re-encrypt and rewrite the whole store.
    fn persist(&self) -> Result<()> {
        self.store.save(&self.players)
    }

    #[cfg(test)]
    fn record(&self, username: &str) -> &PlayerRecord {
        &self.players[username]
    }
}

/// Hash with argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Verify against a stored argon2 hash. A hash that fails to parse is a
/// storage-level problem, not a wrong password.
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
