use std::sync::Arc;

use uuid::Uuid;

use varsel_core::{AppConfig, Environment, NonceSigner};

/// Session and anti-forgery state shared across handlers.
///
/// Sessions are server-minted UUIDs handed to the widget on first load. The
/// nonce signer binds every issued token to one session, so a token lifted
/// from another shopper's page does not verify.
#[derive(Clone)]
pub struct SessionState {
    signer: Arc<NonceSigner>,
}

impl SessionState {
    #[must_use]
    pub fn new(signer: NonceSigner) -> Self {
        Self {
            signer: Arc::new(signer),
        }
    }

    /// Builds session state from loaded configuration.
    ///
    /// In development a missing `VARSEL_NONCE_SECRET` falls back to an
    /// ephemeral random secret so local iteration works; issued nonces then
    /// die with the process. In non-development envs a missing secret fails
    /// startup.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let secret = match &config.nonce_secret {
            Some(secret) => secret.clone(),
            None if config.env == Environment::Development => {
                tracing::warn!(
                    "VARSEL_NONCE_SECRET not set; using an ephemeral secret, issued nonces will not survive a restart"
                );
                ephemeral_secret()
            }
            None => anyhow::bail!(
                "VARSEL_NONCE_SECRET is required outside development; provide a long random value"
            ),
        };

        Ok(Self::new(NonceSigner::new(secret, config.nonce_tick_secs)))
    }

    /// Mints a fresh session id.
    #[must_use]
    pub fn new_session(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Issues a nonce bound to `session_id` for the current tick window.
    #[must_use]
    pub fn issue_nonce(&self, session_id: &str) -> String {
        self.signer.issue(session_id)
    }

    /// Verifies a nonce against `session_id`.
    #[must_use]
    pub fn verify_nonce(&self, session_id: &str, nonce: &str) -> bool {
        self.signer.verify(session_id, nonce)
    }
}

fn ephemeral_secret() -> String {
    use rand::RngCore;

    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(env: Environment, nonce_secret: Option<&str>) -> AppConfig {
        AppConfig {
            env,
            bind_addr: "0.0.0.0:3000".parse().expect("bind addr"),
            log_level: "info".to_string(),
            feed_url: "https://shop.example.com/variations.json".to_string(),
            feed_request_timeout_secs: 10,
            feed_cache_ttl_secs: 600,
            feed_user_agent: "varsel-test/0.1".to_string(),
            nonce_secret: nonce_secret.map(str::to_string),
            nonce_tick_secs: 43_200,
            currency_symbol: "$".to_string(),
            palette: vec!["red".to_string()],
            sizes: vec!["S".to_string()],
        }
    }

    #[test]
    fn issued_nonce_verifies_for_its_session() {
        let state = SessionState::from_config(&config(
            Environment::Production,
            Some("a-long-production-secret"),
        ))
        .expect("state");

        let session = state.new_session();
        let nonce = state.issue_nonce(&session);
        assert!(state.verify_nonce(&session, &nonce));
    }

    #[test]
    fn nonce_does_not_verify_for_another_session() {
        let state =
            SessionState::from_config(&config(Environment::Production, Some("secret"))).expect("state");

        let nonce = state.issue_nonce(&state.new_session());
        assert!(!state.verify_nonce(&state.new_session(), &nonce));
    }

    #[test]
    fn development_falls_back_to_ephemeral_secret() {
        let state = SessionState::from_config(&config(Environment::Development, None))
            .expect("dev should allow a missing secret");

        let session = state.new_session();
        let nonce = state.issue_nonce(&session);
        assert!(state.verify_nonce(&session, &nonce));
    }

    #[test]
    fn production_requires_a_secret() {
        let result = SessionState::from_config(&config(Environment::Production, None));
        assert!(result.is_err(), "expected startup failure, got Ok");
    }

    #[test]
    fn minted_sessions_are_unique() {
        let state = SessionState::from_config(&config(Environment::Development, None)).expect("state");
        assert_ne!(state.new_session(), state.new_session());
    }
}
