use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all profile credentials populated.
fn profile_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("VRCHAT_USER_ID", "usr_123");
    m.insert("VRCHAT_AUTH", "authcookie_abc");
    m.insert("VRCHAT_TWO_FACTOR_AUTH", "2fa_def");
    m
}

#[test]
fn empty_env_uses_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert!(cfg.identity.is_none());
    assert_eq!(cfg.sources, ["wss://yabu.me", "wss://relay.damus.io"]);
    assert_eq!(cfg.recency_days, 7);
    assert_eq!(cfg.display_offset.local_minus_utc(), 9 * 3600);
    assert_eq!(cfg.author_name, "akazdayo");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert!(cfg.gemini_api_key.is_none());
    assert_eq!(cfg.gemini_model, "gemini-2.5-flash");
    assert_eq!(
        cfg.gemini_base_url,
        "https://generativelanguage.googleapis.com"
    );
    assert!(cfg.profile.is_none());
}

#[test]
fn sources_are_split_and_trimmed() {
    let mut map = HashMap::new();
    map.insert("VIBEBOARD_SOURCES", " https://a.example/events , ,./dump.jsonl ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.sources, ["https://a.example/events", "./dump.jsonl"]);
}

#[test]
fn blank_identity_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("VIBEBOARD_IDENTITY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.identity.is_none());
}

#[test]
fn recency_days_override() {
    let mut map = HashMap::new();
    map.insert("VIBEBOARD_RECENCY_DAYS", "14");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.recency_days, 14);
}

#[test]
fn recency_days_zero_fails() {
    let mut map = HashMap::new();
    map.insert("VIBEBOARD_RECENCY_DAYS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VIBEBOARD_RECENCY_DAYS"),
        "expected InvalidEnvVar(VIBEBOARD_RECENCY_DAYS), got: {result:?}"
    );
}

#[test]
fn recency_days_invalid() {
    let mut map = HashMap::new();
    map.insert("VIBEBOARD_RECENCY_DAYS", "a week");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VIBEBOARD_RECENCY_DAYS"),
        "expected InvalidEnvVar(VIBEBOARD_RECENCY_DAYS), got: {result:?}"
    );
}

#[test]
fn display_offset_override() {
    let mut map = HashMap::new();
    map.insert("VIBEBOARD_DISPLAY_OFFSET", "UTC");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.display_offset.local_minus_utc(), 0);
}

#[test]
fn display_offset_invalid() {
    let mut map = HashMap::new();
    map.insert("VIBEBOARD_DISPLAY_OFFSET", "Asia/Tokyo");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VIBEBOARD_DISPLAY_OFFSET"),
        "expected InvalidEnvVar(VIBEBOARD_DISPLAY_OFFSET), got: {result:?}"
    );
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("VIBEBOARD_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VIBEBOARD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(VIBEBOARD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn gemini_key_enables_summarizer() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "secret-key");
    map.insert("GEMINI_MODEL", "gemini-custom");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.gemini_api_key.as_deref(), Some("secret-key"));
    assert_eq!(cfg.gemini_model, "gemini-custom");
}

#[test]
fn debug_redacts_secrets() {
    let mut map = profile_env();
    map.insert("GEMINI_API_KEY", "secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-key"), "{rendered}");
    assert!(!rendered.contains("authcookie_abc"), "{rendered}");
    assert!(!rendered.contains("2fa_def"), "{rendered}");
    assert!(rendered.contains("usr_123"), "{rendered}");
}

#[test]
fn full_profile_credentials_enable_side_channel() {
    let map = profile_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let profile = cfg.profile.expect("profile configured");
    assert_eq!(profile.user_id, "usr_123");
    assert_eq!(profile.auth_cookie, "authcookie_abc");
    assert_eq!(profile.two_factor_cookie, "2fa_def");
    assert_eq!(profile.bio_prefix, "2024/2/28に始めました！");
}

#[test]
fn partial_profile_credentials_fail() {
    let mut map = profile_env();
    map.remove("VRCHAT_AUTH");
    map.remove("VRCHAT_TWO_FACTOR_AUTH");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "VRCHAT_AUTH, VRCHAT_TWO_FACTOR_AUTH"),
        "expected MissingEnvVar for the absent credentials, got: {result:?}"
    );
}
