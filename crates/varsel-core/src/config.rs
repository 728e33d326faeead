use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_list = |var: &str, default: &str| -> Result<Vec<String>, ConfigError> {
        let raw = or_default(var, default);
        let items: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if items.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "expected a comma-separated list with at least one entry".to_string(),
            });
        }
        Ok(items)
    };

    let feed_url = require("VARSEL_FEED_URL")?;

    let env = parse_environment(&or_default("VARSEL_ENV", "development"));

    let bind_addr = parse("VARSEL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VARSEL_LOG_LEVEL", "info");

    let feed_request_timeout_secs = parse_u64("VARSEL_FEED_REQUEST_TIMEOUT_SECS", "10")?;
    let feed_cache_ttl_secs = parse_u64("VARSEL_FEED_CACHE_TTL_SECS", "600")?;
    let feed_user_agent = or_default("VARSEL_FEED_USER_AGENT", "varsel/0.1 (variation-feed)");

    let nonce_secret = lookup("VARSEL_NONCE_SECRET").ok();
    let nonce_tick_secs = parse_u64("VARSEL_NONCE_TICK_SECS", "43200")?;

    let currency_symbol = or_default("VARSEL_CURRENCY_SYMBOL", "$");
    let palette = parse_list("VARSEL_PALETTE", "red,yellow,green")?;
    let sizes = parse_list("VARSEL_SIZES", "S,M,L")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        feed_url,
        feed_request_timeout_secs,
        feed_cache_ttl_secs,
        feed_user_agent,
        nonce_secret,
        nonce_tick_secs,
        currency_symbol,
        palette,
        sizes,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
