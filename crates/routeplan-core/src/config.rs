use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_GRAPHHOPPER_BASE_URL: &str = "https://graphhopper.com/api/1/";

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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

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

    let env = parse_environment(&or_default("ROUTEPLAN_ENV", "development"))?;

    let bind_addr = or_default("ROUTEPLAN_BIND_ADDR", "127.0.0.1:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("ROUTEPLAN_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("ROUTEPLAN_LOG_LEVEL", "info");

    let database_url = or_default("DATABASE_URL", "sqlite://routeplan.db?mode=rwc");
    let db_max_connections = parse_u32("ROUTEPLAN_DB_MAX_CONNECTIONS", "5")?;

    let graphhopper_api_key = lookup("GRAPHHOPPER_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let graphhopper_base_url =
        or_default("ROUTEPLAN_GRAPHHOPPER_BASE_URL", DEFAULT_GRAPHHOPPER_BASE_URL);
    let geocode_country = Some(or_default("ROUTEPLAN_GEOCODE_COUNTRY", "PH"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let upstream_timeout_secs = parse_u64("ROUTEPLAN_UPSTREAM_TIMEOUT_SECS", "40")?;
    let request_timeout_secs = parse_u64("ROUTEPLAN_REQUEST_TIMEOUT_SECS", "15")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "ROUTEPLAN_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let max_point_spread_deg = or_default("ROUTEPLAN_MAX_POINT_SPREAD_DEG", "10")
        .parse::<f64>()
        .map_err(|e| invalid("ROUTEPLAN_MAX_POINT_SPREAD_DEG", e.to_string()))?;
    if !max_point_spread_deg.is_finite() || max_point_spread_deg <= 0.0 {
        return Err(invalid(
            "ROUTEPLAN_MAX_POINT_SPREAD_DEG",
            "must be a positive number of degrees".to_string(),
        ));
    }

    let backend_url = or_default("ROUTEPLAN_BACKEND_URL", "http://127.0.0.1:5000");
    let user_agent = or_default("ROUTEPLAN_USER_AGENT", "routeplan/0.1 (route-planner)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        database_url,
        db_max_connections,
        graphhopper_api_key,
        graphhopper_base_url,
        geocode_country,
        upstream_timeout_secs,
        request_timeout_secs,
        max_point_spread_deg,
        backend_url,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ROUTEPLAN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
