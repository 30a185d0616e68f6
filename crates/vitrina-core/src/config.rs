use url::Url;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; tests drive this with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("VITRINA_ENV", "development"));
    let log_level = or_default("VITRINA_LOG_LEVEL", "info");

    let api_base_url = parse_base_url(&or_default(
        "VITRINA_API_BASE_URL",
        "http://localhost:8085/api",
    ))
    .map_err(|reason| invalid("VITRINA_API_BASE_URL", reason))?;

    let request_timeout_secs = parse_u64("VITRINA_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("VITRINA_USER_AGENT", "vitrina/0.1 (storefront)");

    let search_debounce_ms = parse_u64("VITRINA_SEARCH_DEBOUNCE_MS", "300")?;
    if search_debounce_ms == 0 {
        return Err(invalid(
            "VITRINA_SEARCH_DEBOUNCE_MS",
            "debounce window must be greater than zero".to_string(),
        ));
    }

    let suggestion_limit = parse_usize("VITRINA_SUGGESTION_LIMIT", "5")?;
    let full_results_limit = parse_usize("VITRINA_FULL_RESULTS_LIMIT", "50")?;
    let description_preview_len = parse_usize("VITRINA_DESCRIPTION_PREVIEW_LEN", "100")?;
    let suggestion_hide_delay_ms = parse_u64("VITRINA_SUGGESTION_HIDE_DELAY_MS", "200")?;
    let related_page_size = parse_u32("VITRINA_RELATED_PAGE_SIZE", "10")?;

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        request_timeout_secs,
        user_agent,
        search_debounce_ms,
        suggestion_limit,
        full_results_limit,
        description_preview_len,
        suggestion_hide_delay_ms,
        related_page_size,
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

/// Accepts `http(s)://host[...]` and strips trailing slashes.
fn parse_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| format!("{raw:?} is not a valid URL: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("expected an http(s) URL, got {raw:?}"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("missing host in {raw:?}"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
