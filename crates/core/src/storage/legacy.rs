//! Legacy plaintext store import
//!
//! The old client kept accounts in a plain JSON file with cleartext
//! passwords. This module only reads that format; the migration path in
//! [`crate::auth`] hashes the passwords and folds the records into the
//! encrypted store. Retiring the legacy file afterward is the caller's job.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// One account as stored by the legacy plaintext client.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyRecord {
    pub password: String,
    pub chips: Option<u64>,
    #[serde(default)]
    pub games_played: u64,
    #[serde(default)]
    pub games_won: u64,
    #[serde(default)]
    pub games_lost: u64,
    #[serde(default)]
    pub games_drawn: u64,
}

/// Read a legacy store file. The file is never written by this subsystem.
pub fn read_legacy_store<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, LegacyRecord>> {
    let raw = fs::read(path.as_ref())?;
    Ok(serde_json::from_slice(&raw)?)
}
