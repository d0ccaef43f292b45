use crate::app_config::{AppConfig, Environment, MapSettings};
use crate::map::cluster::MAX_ZOOM;
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
/// Decoupled from the process environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let bind_addr = or_default("PROPMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PROPMAP_BIND_ADDR", e.to_string()))?;

    let env = parse_environment(&or_default("PROPMAP_ENV", "development"));
    let log_level = or_default("PROPMAP_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "PROPMAP_CATALOG_PATH",
        "./config/catalog.yaml",
    ));
    let icon_overrides_path = lookup("PROPMAP_ICON_OVERRIDES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let center_lat = parse_f64("PROPMAP_MAP_CENTER_LAT", "12.97")?;
    if !(-90.0..=90.0).contains(&center_lat) {
        return Err(invalid(
            "PROPMAP_MAP_CENTER_LAT",
            format!("{center_lat} is outside [-90, 90]"),
        ));
    }

    let center_lon = parse_f64("PROPMAP_MAP_CENTER_LON", "77.59")?;
    if !(-180.0..=180.0).contains(&center_lon) {
        return Err(invalid(
            "PROPMAP_MAP_CENTER_LON",
            format!("{center_lon} is outside [-180, 180]"),
        ));
    }

    let zoom = or_default("PROPMAP_MAP_ZOOM", "12")
        .trim()
        .parse::<u8>()
        .map_err(|e| invalid("PROPMAP_MAP_ZOOM", e.to_string()))?;
    if zoom > MAX_ZOOM {
        return Err(invalid(
            "PROPMAP_MAP_ZOOM",
            format!("{zoom} exceeds max zoom {MAX_ZOOM}"),
        ));
    }

    let cluster_radius_px = parse_f64("PROPMAP_CLUSTER_RADIUS_PX", "80")?;
    if !cluster_radius_px.is_finite() || cluster_radius_px <= 0.0 {
        return Err(invalid(
            "PROPMAP_CLUSTER_RADIUS_PX",
            "must be a positive number of pixels".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        icon_overrides_path,
        map: MapSettings {
            center_lat,
            center_lon,
            zoom,
            cluster_radius_px,
        },
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
#[path = "config_test.rs"]
mod tests;
