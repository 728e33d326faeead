use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Upstream URL of the variation feed document.
    pub feed_url: String,
    pub feed_request_timeout_secs: u64,
    pub feed_cache_ttl_secs: u64,
    pub feed_user_agent: String,
    /// Secret behind issued nonces. Optional here; the server decides per
    /// environment whether a missing secret is a startup error.
    pub nonce_secret: Option<String>,
    pub nonce_tick_secs: u64,
    pub currency_symbol: String,
    /// Colors the widget offers, in display order.
    pub palette: Vec<String>,
    /// Sizes the widget offers, in display order.
    pub sizes: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("feed_url", &self.feed_url)
            .field(
                "feed_request_timeout_secs",
                &self.feed_request_timeout_secs,
            )
            .field("feed_cache_ttl_secs", &self.feed_cache_ttl_secs)
            .field("feed_user_agent", &self.feed_user_agent)
            .field(
                "nonce_secret",
                &self.nonce_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("nonce_tick_secs", &self.nonce_tick_secs)
            .field("currency_symbol", &self.currency_symbol)
            .field("palette", &self.palette)
            .field("sizes", &self.sizes)
            .finish()
    }
}
