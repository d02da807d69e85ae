use crate::app_config::{AppConfig, CmsCredentials, Environment};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files; the caller manages
/// env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests can
/// drive them with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    // Blank values fall back to the default, like unset ones.
    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
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

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            _ => Ok(None),
        }
    };

    let space_id = require("CONTENTFUL_SPACES_ID")?;
    let access_token = require("CONTENTFUL_CDA_TOKEN")?;
    let environment = or_default("CONTENTFUL_ENV", "master");

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;
    let bind_addr = parse_addr("STOREFRONT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");

    let cms_base_url = or_default("STOREFRONT_CMS_BASE_URL", "https://cdn.contentful.com");
    let content_type = or_default("STOREFRONT_CONTENT_TYPE", "products");
    let cms_request_timeout_secs = parse_optional_u64("STOREFRONT_CMS_REQUEST_TIMEOUT_SECS")?;
    let cms_user_agent = or_default("STOREFRONT_CMS_USER_AGENT", "storefront/0.1 (catalog)");
    let detail_revalidate_secs = parse_u64("STOREFRONT_DETAIL_REVALIDATE_SECS", "60")?;
    let max_sessions = usize::try_from(parse_u64("STOREFRONT_MAX_SESSIONS", "10000")?)
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "STOREFRONT_MAX_SESSIONS".to_string(),
            reason: e.to_string(),
        })?;
    let session_idle_secs = parse_u64("STOREFRONT_SESSION_IDLE_SECS", "1800")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cms: CmsCredentials {
            space_id,
            environment,
            access_token,
        },
        cms_base_url,
        content_type,
        cms_request_timeout_secs,
        cms_user_agent,
        detail_revalidate_secs,
        max_sessions,
        session_idle_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
