use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Initial map viewport and marker clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub cluster_radius_px: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_lat: 12.97,
            center_lon: 77.59,
            zoom: 12,
            cluster_radius_px: 80.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub icon_overrides_path: Option<PathBuf>,
    pub map: MapSettings,
}
