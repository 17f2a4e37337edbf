use crate::app_config::{AppConfig, ProfileCredentials};
use crate::offset::parse_utc_offset;
use crate::ConfigError;

const DEFAULT_SOURCES: &str = "wss://yabu.me,wss://relay.damus.io";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_BIO_PREFIX: &str = "2024/2/28に始めました！";

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
/// Every variable has a default or is optional, so an empty environment
/// yields a usable config for the delimited-file path.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

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

    let identity = optional("VIBEBOARD_IDENTITY");
    let sources = parse_sources(&or_default("VIBEBOARD_SOURCES", DEFAULT_SOURCES));

    let recency_days = parse_u32("VIBEBOARD_RECENCY_DAYS", "7")?;
    if recency_days == 0 {
        return Err(invalid(
            "VIBEBOARD_RECENCY_DAYS",
            "must be at least 1".to_string(),
        ));
    }

    let raw_offset = or_default("VIBEBOARD_DISPLAY_OFFSET", "+09:00");
    let display_offset = parse_utc_offset(&raw_offset).ok_or_else(|| {
        invalid(
            "VIBEBOARD_DISPLAY_OFFSET",
            format!("'{raw_offset}' is not UTC, Z, or a +HH:MM offset"),
        )
    })?;

    let author_name = or_default("VIBEBOARD_AUTHOR_NAME", "akazdayo");
    let log_level = or_default("VIBEBOARD_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("VIBEBOARD_REQUEST_TIMEOUT_SECS", "30")?;

    let gemini_api_key = optional("GEMINI_API_KEY");
    let gemini_model = or_default("GEMINI_MODEL", "gemini-2.5-flash");
    let gemini_base_url = or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);

    let profile = match (
        optional("VRCHAT_USER_ID"),
        optional("VRCHAT_AUTH"),
        optional("VRCHAT_TWO_FACTOR_AUTH"),
    ) {
        (None, None, None) => None,
        (Some(user_id), Some(auth_cookie), Some(two_factor_cookie)) => Some(ProfileCredentials {
            user_id,
            auth_cookie,
            two_factor_cookie,
            bio_prefix: or_default("VRCHAT_BIO_PREFIX", DEFAULT_BIO_PREFIX),
        }),
        (user_id, auth, two_factor) => {
            let missing = [
                ("VRCHAT_USER_ID", user_id.is_none()),
                ("VRCHAT_AUTH", auth.is_none()),
                ("VRCHAT_TWO_FACTOR_AUTH", two_factor.is_none()),
            ]
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(var, _)| *var)
            .collect::<Vec<_>>();
            return Err(ConfigError::MissingEnvVar(missing.join(", ")));
        }
    };

    Ok(AppConfig {
        identity,
        sources,
        recency_days,
        display_offset,
        author_name,
        log_level,
        request_timeout_secs,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        profile,
    })
}

/// Splits a comma-separated source list, dropping blanks.
fn parse_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
