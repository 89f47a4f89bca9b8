//! In-memory session for a logged-in player
//!
//! Sessions are never persisted. They are issued by a successful login and
//! carried explicitly by the caller; there is no ambient "current user"
//! state anywhere in the crate.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};

/// Proof of a prior successful authentication.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    token: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Issue a fresh session with an unguessable token.
    pub fn issue(username: &str, ttl_secs: i64) -> Self {
        Self {
            username: username.to_string(),
            token: generate_token(),
            expires_at: Utc::now() + Duration::seconds(ttl_secs),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A session is valid iff a token exists and the current time is
    /// strictly before the expiry.
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty() && Utc::now() < self.expires_at
    }

    /// Extend the expiry if the session is still valid. The token is not
    /// rotated. Returns whether the refresh happened.
    pub fn refresh(&mut self, ttl_secs: i64) -> bool {
        if !self.is_valid() {
            return false;
        }
        self.expires_at = Utc::now() + Duration::seconds(ttl_secs);
        true
    }

    /// Invalidate unconditionally (logout).
    pub fn revoke(&mut self) {
        self.token.clear();
        self.expires_at = DateTime::<Utc>::MIN_UTC;
    }
}

/// 32 random bytes, URL-safe base64 without padding.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_valid() {
        let session = Session::issue("alice", 3600);
        assert!(session.is_valid());
        assert_eq!(session.username(), "alice");
    }

    #[test]
    fn revoked_session_is_invalid() {
        let mut session = Session::issue("alice", 3600);
        session.revoke();
        assert!(!session.is_valid());
        assert!(session.token().is_empty());
    }

    #[test]
    fn expired_session_is_invalid_and_cannot_refresh() {
        let mut session = Session::issue("alice", -1);
        assert!(!session.is_valid());
        assert!(!session.refresh(3600));
        assert!(!session.is_valid());
    }

    #[test]
    fn refresh_extends_expiry_without_rotating_token() {
        let mut session = Session::issue("alice", 10);
        let token = session.token().to_string();
        let expiry = session.expires_at();

        assert!(session.refresh(3600));
        assert_eq!(session.token(), token);
        assert!(session.expires_at() > expiry);
    }

    #[test]
    fn tokens_are_unique() {
        let a = Session::issue("alice", 60);
        let b = Session::issue("alice", 60);
        assert_ne!(a.token(), b.token());
    }
}
