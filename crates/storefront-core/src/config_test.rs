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

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("CONTENTFUL_SPACES_ID", "space123");
    m.insert("CONTENTFUL_CDA_TOKEN", "token-abc");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "STOREFRONT_ENV"));
}

#[test]
fn build_app_config_fails_without_space_id() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "CONTENTFUL_SPACES_ID"),
        "expected MissingEnvVar(CONTENTFUL_SPACES_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_access_token() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("CONTENTFUL_SPACES_ID", "space123");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "CONTENTFUL_CDA_TOKEN"),
        "expected MissingEnvVar(CONTENTFUL_CDA_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_token_as_missing() {
    let mut map = full_env();
    map.insert("CONTENTFUL_CDA_TOKEN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "CONTENTFUL_CDA_TOKEN"),
        "expected MissingEnvVar(CONTENTFUL_CDA_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("STOREFRONT_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_BIND_ADDR"),
        "expected InvalidEnvVar(STOREFRONT_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.cms.space_id, "space123");
    assert_eq!(cfg.cms.access_token, "token-abc");
    assert_eq!(cfg.cms.environment, "master");
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.cms_base_url, "https://cdn.contentful.com");
    assert_eq!(cfg.content_type, "products");
    assert!(cfg.cms_request_timeout_secs.is_none());
    assert_eq!(cfg.cms_user_agent, "storefront/0.1 (catalog)");
    assert_eq!(cfg.detail_revalidate_secs, 60);
}

#[test]
fn build_app_config_reads_contentful_environment_override() {
    let mut map = full_env();
    map.insert("CONTENTFUL_ENV", "staging");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cms.environment, "staging");
}

#[test]
fn blank_contentful_env_defaults_to_master() {
    let mut map = full_env();
    map.insert("CONTENTFUL_ENV", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cms.environment, "master");

    map.insert("CONTENTFUL_ENV", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cms.environment, "master");
}

#[test]
fn blank_optional_vars_fall_back_to_defaults() {
    let mut map = full_env();
    map.insert("STOREFRONT_CONTENT_TYPE", "");
    map.insert("STOREFRONT_BIND_ADDR", " ");
    map.insert("STOREFRONT_DETAIL_REVALIDATE_SECS", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.content_type, "products");
    assert_eq!(cfg.bind_addr.port(), 3000);
    assert_eq!(cfg.detail_revalidate_secs, 60);
}

#[test]
fn cms_request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("STOREFRONT_CMS_REQUEST_TIMEOUT_SECS", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cms_request_timeout_secs, Some(15));
}

#[test]
fn cms_request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("STOREFRONT_CMS_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_CMS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOREFRONT_CMS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn detail_revalidate_secs_override() {
    let mut map = full_env();
    map.insert("STOREFRONT_DETAIL_REVALIDATE_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.detail_revalidate_secs, 5);
}

#[test]
fn app_config_debug_redacts_access_token() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("token-abc"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn session_limits_default_and_override() {
    let mut map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_sessions, 10_000);
    assert_eq!(cfg.session_idle_secs, 1800);

    map.insert("STOREFRONT_MAX_SESSIONS", "50");
    map.insert("STOREFRONT_SESSION_IDLE_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_sessions, 50);
    assert_eq!(cfg.session_idle_secs, 60);
}

#[test]
fn max_sessions_invalid() {
    let mut map = full_env();
    map.insert("STOREFRONT_MAX_SESSIONS", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_MAX_SESSIONS"),
        "expected InvalidEnvVar(STOREFRONT_MAX_SESSIONS), got: {result:?}"
    );
}
