use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
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

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let sheet_url = require("MCMAP_SHEET_URL")?.trim().to_string();
    if !(sheet_url.starts_with("https://") || sheet_url.starts_with("http://")) {
        return Err(invalid(
            "MCMAP_SHEET_URL",
            "expected an http:// or https:// URL".to_string(),
        ));
    }

    let cache_ttl_secs = parse_u64("MCMAP_CACHE_TTL_SECS", "300")?;
    let env = parse_environment(&or_default("MCMAP_ENV", "development"));

    let bind_addr = or_default("MCMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("MCMAP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("MCMAP_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("MCMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MCMAP_USER_AGENT", "mcmap/0.1 (commercial-dashboard)");
    let max_retries = parse_u32("MCMAP_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("MCMAP_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        sheet_url,
        cache_ttl_secs,
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
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
