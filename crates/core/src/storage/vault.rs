//! Encryption-at-rest for the credential store
//!
//! A 32-byte AES-256-GCM key lives in its own file next to the store. It is
//! generated once on first run; there is no rotation or versioning, and the
//! store is unrecoverable without it.

use std::fs;
use std::path::{Path, PathBuf};

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use tracing::info;

use crate::error::{Error, Result};

/// AES-GCM nonce size.
const NONCE_SIZE: usize = 12;

/// Key length for AES-256.
const KEY_SIZE: usize = 32;

/// Holds the root key and seals/opens store blobs.
pub struct Vault {
    key: [u8; KEY_SIZE],
}

impl Vault {
    /// Load the key file, generating a fresh key on first run.
    ///
    /// A new key file is written with owner-only permissions where the OS
    /// supports it (best effort, not enforced).
    pub fn ensure_key<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut key = [0u8; KEY_SIZE];
            OsRng.fill_bytes(&mut key);
            fs::write(path, key)?;
            restrict_permissions(path);
            info!(path = %path.display(), "generated new vault key");
            return Ok(Self { key });
        }

        let raw = fs::read(path)?;
        let key: [u8; KEY_SIZE] = raw
            .try_into()
            .map_err(|_| Error::Crypto(format!("key file {} has wrong length", path.display())))?;
        Ok(Self { key })
    }

    /// Build a vault from raw key bytes (for testing).
    #[cfg(test)]
    pub fn from_key(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Encrypt a plaintext. Output layout: `nonce(12) || ciphertext`.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| Error::Crypto(format!("cipher init failed: {e}")))?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| Error::Crypto(format!("encryption failed: {e}")))?;

        let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    /// Decrypt a blob produced by [`seal`](Self::seal).
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.len() < NONCE_SIZE {
            return Err(Error::Crypto("encrypted blob too short".into()));
        }

        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| Error::Crypto(format!("cipher init failed: {e}")))?;

        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| Error::Crypto(format!("decryption failed: {e}")))
    }
}

/// Set mode 0o600 on Unix; no-op elsewhere.
pub fn restrict_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

/// Default key file location inside the data directory.
pub fn key_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".vault.key")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_key() -> [u8; KEY_SIZE] {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn seal_open_roundtrip() {
        let vault = Vault::from_key(test_key());
        let blob = vault.seal(b"chips and counters").unwrap();
        assert_eq!(vault.open(&blob).unwrap(), b"chips and counters");
    }

    #[test]
    fn ciphertext_differs_from_plaintext() {
        let vault = Vault::from_key(test_key());
        let blob = vault.seal(b"secret").unwrap();
        assert_ne!(blob, b"secret");
    }

    #[test]
    fn wrong_key_fails_to_open() {
        let vault1 = Vault::from_key(test_key());
        let vault2 = Vault::from_key(test_key());
        let blob = vault1.seal(b"secret").unwrap();
        assert!(vault2.open(&blob).is_err());
    }

    #[test]
    fn truncated_blob_is_rejected() {
        let vault = Vault::from_key(test_key());
        assert!(vault.open(&[1, 2, 3]).is_err());
    }

    #[test]
    fn key_is_generated_once_and_reloaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".vault.key");

        let vault1 = Vault::ensure_key(&path).unwrap();
        let blob = vault1.seal(b"payload").unwrap();

        // Second load must read the same key back
        let vault2 = Vault::ensure_key(&path).unwrap();
        assert_eq!(vault2.open(&blob).unwrap(), b"payload");
    }

    #[test]
    fn bad_key_file_length_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".vault.key");
        fs::write(&path, b"short").unwrap();
        assert!(Vault::ensure_key(&path).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join(".vault.key");
        Vault::ensure_key(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
