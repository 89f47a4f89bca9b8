//! Encrypted credential storage for Felt
//!
//! The whole player map is serialized to JSON, sealed with AES-256-GCM, and
//! written as a single opaque blob. Every mutation rewrites the whole file;
//! there are no partial updates. Concurrent processes sharing one store file
//! are unsupported and unguarded.

mod legacy;
mod vault;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{instrument, warn};

use crate::error::{Error, Result};
use crate::models::PlayerRecord;

pub use legacy::{read_legacy_store, LegacyRecord};
pub use vault::Vault;

/// Store file name inside the data directory.
const STORE_FILE: &str = "players.enc";

/// Durable, encrypted persistence of player records.
pub struct CredentialStore {
    path: PathBuf,
    vault: Vault,
}

impl CredentialStore {
    /// Open the store rooted at `data_dir`, creating the directory and the
    /// encryption key on first run.
    #[instrument(skip(data_dir), fields(dir = %data_dir.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        let vault = Vault::ensure_key(vault::key_path(data_dir))?;
        Ok(Self {
            path: data_dir.join(STORE_FILE),
            vault,
        })
    }

    /// Load and decrypt all player records.
    ///
    /// A store file that is absent or empty loads as an empty map (first
    /// run). A file that exists but cannot be decrypted or parsed is a
    /// [`Error::StoreCorrupt`]: treating it as empty would silently discard
    /// every account on key loss or corruption.
    pub fn load(&self) -> Result<BTreeMap<String, PlayerRecord>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let blob = fs::read(&self.path)?;
        if blob.is_empty() {
            return Ok(BTreeMap::new());
        }

        let plaintext = self.vault.open(&blob).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "credential store failed to decrypt");
            Error::StoreCorrupt(e.to_string())
        })?;

        serde_json::from_slice(&plaintext).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "credential store failed to parse");
            Error::StoreCorrupt(e.to_string())
        })
    }

    /// Serialize, encrypt, and write the whole player map.
    pub fn save(&self, players: &BTreeMap<String, PlayerRecord>) -> Result<()> {
        let plaintext = serde_json::to_vec(players)?;
        let blob = self.vault.seal(&plaintext)?;
        fs::write(&self.path, blob)?;
        vault::restrict_permissions(&self.path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_players() -> BTreeMap<String, PlayerRecord> {
        let mut players = BTreeMap::new();
        let mut alice = PlayerRecord::new("hash-a".into(), 1000);
        alice.games_played = 7;
        alice.games_won = 3;
        players.insert("Alice".to_string(), alice);
        players.insert(
            "bob".to_string(),
            PlayerRecord::new("hash-b".into(), 250),
        );
        players
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::open(dir.path()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn empty_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::open(dir.path()).unwrap();
        fs::write(store.path(), b"").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_load_is_a_fixed_point() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::open(dir.path()).unwrap();

        let players = sample_players();
        store.save(&players).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, players);

        // Saving what we loaded must reproduce the same logical content
        store.save(&loaded).unwrap();
        assert_eq!(store.load().unwrap(), players);
    }

    #[test]
    fn store_file_is_not_plaintext() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::open(dir.path()).unwrap();
        store.save(&sample_players()).unwrap();

        let raw = fs::read(store.path()).unwrap();
        let raw_str = String::from_utf8_lossy(&raw);
        assert!(!raw_str.contains("hash-a"));
        assert!(!raw_str.contains("Alice"));
    }

    #[test]
    fn corrupt_file_is_a_distinguished_error() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::open(dir.path()).unwrap();
        store.save(&sample_players()).unwrap();

        fs::write(store.path(), b"garbage that is not a sealed blob").unwrap();
        assert!(matches!(store.load(), Err(Error::StoreCorrupt(_))));
    }

    #[test]
    fn store_under_a_different_key_is_corrupt() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::open(dir.path()).unwrap();
        store.save(&sample_players()).unwrap();

        // Losing the key makes the store unrecoverable
        fs::remove_file(vault::key_path(dir.path())).unwrap();
        let reopened = CredentialStore::open(dir.path()).unwrap();
        assert!(matches!(reopened.load(), Err(Error::StoreCorrupt(_))));
    }
}
