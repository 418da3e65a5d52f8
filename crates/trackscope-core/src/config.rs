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
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_base_url = require("TRACKSCOPE_API_BASE_URL")?;
    let api_token = lookup("TRACKSCOPE_API_TOKEN").ok();

    let env = parse_environment(&or_default("TRACKSCOPE_ENV", "development"));
    let log_level = or_default("TRACKSCOPE_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("TRACKSCOPE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TRACKSCOPE_USER_AGENT", "trackscope/0.1 (report-compiler)");

    let page_size = parse_u32("TRACKSCOPE_PAGE_SIZE", "100")?;
    let max_pages = parse_usize("TRACKSCOPE_MAX_PAGES", "100")?;
    // Previews are a bounded sample; the backend rejects page sizes past 500.
    let preview_page_size = parse_u32("TRACKSCOPE_PREVIEW_PAGE_SIZE", "500")?.min(500);

    Ok(AppConfig {
        api_base_url,
        api_token,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        page_size,
        max_pages,
        preview_page_size,
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

#[cfg(test)]
mod tests {
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
        m.insert("TRACKSCOPE_API_BASE_URL", "https://api.example.com");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_base_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TRACKSCOPE_API_BASE_URL"),
            "expected MissingEnvVar(TRACKSCOPE_API_BASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.api_base_url, "https://api.example.com");
        assert!(cfg.api_token.is_none());
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "trackscope/0.1 (report-compiler)");
        assert_eq!(cfg.page_size, 100);
        assert_eq!(cfg.max_pages, 100);
        assert_eq!(cfg.preview_page_size, 500);
    }

    #[test]
    fn build_app_config_reads_optional_token() {
        let mut map = full_env();
        map.insert("TRACKSCOPE_API_TOKEN", "secret-token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn build_app_config_fails_with_invalid_page_size() {
        let mut map = full_env();
        map.insert("TRACKSCOPE_PAGE_SIZE", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRACKSCOPE_PAGE_SIZE"),
            "expected InvalidEnvVar(TRACKSCOPE_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_caps_preview_page_size() {
        let mut map = full_env();
        map.insert("TRACKSCOPE_PREVIEW_PAGE_SIZE", "1000");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.preview_page_size, 500);
    }

    #[test]
    fn debug_redacts_api_token() {
        let mut map = full_env();
        map.insert("TRACKSCOPE_API_TOKEN", "secret-token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[redacted]"));
    }
}
