use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
