use chrono::Utc;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length in hex characters of an issued token.
pub const NONCE_LEN: usize = 10;

/// Issues and verifies the per-session anti-forgery tokens that protect the
/// lookup and add-to-cart endpoints.
///
/// A token is the truncated hex SHA-256 of the server secret, the session id,
/// and the current tick window. Verification accepts the current and the
/// immediately previous window, so a token stays valid for one to two ticks
/// rather than expiring at a hard instant.
#[derive(Clone)]
pub struct NonceSigner {
    secret: String,
    tick_secs: u64,
}

impl NonceSigner {
    #[must_use]
    pub fn new(secret: impl Into<String>, tick_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            tick_secs: tick_secs.max(1),
        }
    }

    /// Issues a token for `session_id` in the current tick window.
    #[must_use]
    pub fn issue(&self, session_id: &str) -> String {
        self.issue_at(session_id, unix_now())
    }

    /// Verifies a token against the current and previous tick windows.
    #[must_use]
    pub fn verify(&self, session_id: &str, token: &str) -> bool {
        self.verify_at(session_id, token, unix_now())
    }

    /// Like [`Self::issue`] with an explicit clock, `now_secs` being seconds
    /// since the Unix epoch.
    #[must_use]
    pub fn issue_at(&self, session_id: &str, now_secs: u64) -> String {
        self.token_for_tick(session_id, now_secs / self.tick_secs)
    }

    /// Like [`Self::verify`] with an explicit clock.
    #[must_use]
    pub fn verify_at(&self, session_id: &str, token: &str, now_secs: u64) -> bool {
        let tick = now_secs / self.tick_secs;
        if constant_time_eq(token, &self.token_for_tick(session_id, tick)) {
            return true;
        }
        let Some(previous) = tick.checked_sub(1) else {
            return false;
        };
        constant_time_eq(token, &self.token_for_tick(session_id, previous))
    }

    fn token_for_tick(&self, session_id: &str, tick: u64) -> String {
        let input = format!("{}|{}|{}", self.secret, session_id, tick);
        let hex = format!("{:x}", Sha256::digest(input.as_bytes()));
        hex[..NONCE_LEN].to_string()
    }
}

impl std::fmt::Debug for NonceSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceSigner")
            .field("secret", &"[redacted]")
            .field("tick_secs", &self.tick_secs)
            .finish()
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}

fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: u64 = 43_200;

    fn signer() -> NonceSigner {
        NonceSigner::new("test-secret", TICK)
    }

    #[test]
    fn issued_token_has_fixed_length() {
        let token = signer().issue_at("session-a", 1_000_000);
        assert_eq!(token.len(), NONCE_LEN);
    }

    #[test]
    fn token_verifies_in_same_window() {
        let s = signer();
        let token = s.issue_at("session-a", 1_000_000);
        assert!(s.verify_at("session-a", &token, 1_000_000));
    }

    #[test]
    fn token_verifies_in_next_window() {
        let s = signer();
        let token = s.issue_at("session-a", 1_000_000);
        assert!(s.verify_at("session-a", &token, 1_000_000 + TICK));
    }

    #[test]
    fn token_expires_after_two_windows() {
        let s = signer();
        let token = s.issue_at("session-a", 1_000_000);
        assert!(!s.verify_at("session-a", &token, 1_000_000 + 2 * TICK));
    }

    #[test]
    fn token_is_bound_to_session() {
        let s = signer();
        let token = s.issue_at("session-a", 1_000_000);
        assert!(!s.verify_at("session-b", &token, 1_000_000));
    }

    #[test]
    fn token_is_bound_to_secret() {
        let token = signer().issue_at("session-a", 1_000_000);
        let other = NonceSigner::new("other-secret", TICK);
        assert!(!other.verify_at("session-a", &token, 1_000_000));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(!signer().verify_at("session-a", "0123456789", 1_000_000));
        assert!(!signer().verify_at("session-a", "", 1_000_000));
        assert!(!signer().verify_at("session-a", "too-short", 1_000_000));
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains("test-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn zero_tick_secs_is_clamped() {
        // Avoids a divide-by-zero on a misconfigured signer.
        let s = NonceSigner::new("test-secret", 0);
        let token = s.issue_at("session-a", 5);
        assert!(s.verify_at("session-a", &token, 5));
    }
}
