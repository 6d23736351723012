use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var carries a non-numeric value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var carries a non-numeric value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
///
/// The access token is optional here: the CLI merges it with `--access-token`
/// and `--token-file` and reports a descriptive error when no source
/// provides one.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let access_token = lookup("LINKEDIN_ACCESS_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let api_version = or_default("LINKPULSE_API_VERSION", "202401");
    let log_level = or_default("LINKPULSE_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("LINKPULSE_REQUEST_TIMEOUT_SECS", "10")?;
    let max_retries = parse_u32("LINKPULSE_MAX_RETRIES", "3")?;
    let inter_request_delay_ms = parse_u64("LINKPULSE_INTER_REQUEST_DELAY_MS", "200")?;
    let retry_backoff_base_ms = parse_u64("LINKPULSE_RETRY_BACKOFF_BASE_MS", "1000")?;

    let rules_path = lookup("LINKPULSE_RULES_PATH").ok().map(PathBuf::from);

    Ok(AppConfig {
        access_token,
        api_version,
        log_level,
        request_timeout_secs,
        max_retries,
        inter_request_delay_ms,
        retry_backoff_base_ms,
        rules_path,
    })
}
