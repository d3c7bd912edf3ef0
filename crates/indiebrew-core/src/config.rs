use crate::app_config::{AppConfig, Environment, RateLimitConfig};
use crate::places::{RankStrategy, DEFAULT_RADIUS_M, MAX_RADIUS_M, MAX_RESULTS, MIN_RADIUS_M};
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
/// Parsing and validation live here, decoupled from the process environment
/// so tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let env = parse_environment(&or_default("INDIEBREW_ENV", "development"))?;

    let bind_addr = or_default("INDIEBREW_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("INDIEBREW_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("INDIEBREW_LOG_LEVEL", "info");
    let lists_path = lookup("INDIEBREW_LISTS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let places_path = PathBuf::from(require("INDIEBREW_PLACES_PATH")?);

    let default_radius_m = parse_u32("INDIEBREW_DEFAULT_RADIUS_M", &DEFAULT_RADIUS_M.to_string())?;
    if !(MIN_RADIUS_M..=MAX_RADIUS_M).contains(&default_radius_m) {
        return Err(invalid(
            "INDIEBREW_DEFAULT_RADIUS_M",
            format!("must be between {MIN_RADIUS_M} and {MAX_RADIUS_M}"),
        ));
    }

    let max_results = parse_usize("INDIEBREW_MAX_RESULTS", &MAX_RESULTS.to_string())?;
    if max_results == 0 {
        return Err(invalid(
            "INDIEBREW_MAX_RESULTS",
            "must be at least 1".to_string(),
        ));
    }

    let default_strategy = or_default("INDIEBREW_DEFAULT_STRATEGY", "composite")
        .parse::<RankStrategy>()
        .map_err(|e| invalid("INDIEBREW_DEFAULT_STRATEGY", e.to_string()))?;

    let require_coffee_hint = parse_bool("INDIEBREW_REQUIRE_COFFEE_HINT", "false")?;

    let rate_limit = match lookup("INDIEBREW_RATE_LIMIT_MAX_REQUESTS") {
        Ok(_) => {
            let max_requests = parse_usize("INDIEBREW_RATE_LIMIT_MAX_REQUESTS", "0")?;
            let window_secs = parse_u64("INDIEBREW_RATE_LIMIT_WINDOW_SECS", "60")?;
            if max_requests == 0 || window_secs == 0 {
                return Err(invalid(
                    "INDIEBREW_RATE_LIMIT_MAX_REQUESTS",
                    "rate limit requests and window must both be positive".to_string(),
                ));
            }
            Some(RateLimitConfig {
                max_requests,
                window_secs,
            })
        }
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        lists_path,
        places_path,
        default_radius_m,
        max_results,
        default_strategy,
        require_coffee_hint,
        rate_limit,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INDIEBREW_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
