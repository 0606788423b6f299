use std::env;
use std::path::PathBuf;

use reviewer_core::config::LayeredConfig;
use reviewer_core::error::Result;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub config_file: Option<PathBuf>,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("REVIEWER_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);

        let cors_origin =
            env::var("REVIEWER_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let config_file = env::var("REVIEWER_CONFIG").ok().map(PathBuf::from);

        Self {
            port,
            cors_origin,
            config_file,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Forwarder settings: defaults, then the optional config file, then environment
    pub fn forwarder_settings(&self) -> Result<LayeredConfig> {
        let mut settings = LayeredConfig::with_defaults();
        if let Some(path) = &self.config_file {
            settings = settings.load_from_file(path)?;
        }
        Ok(settings.load_from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ApiConfig {
            port: 8080,
            cors_origin: "http://localhost:5173".to_string(),
            config_file: None,
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let config = ApiConfig {
            port: 3000,
            cors_origin: "http://localhost:5173".to_string(),
            config_file: Some(PathBuf::from("/nonexistent/reviewer.toml")),
        };
        assert!(config.forwarder_settings().unwrap_err().is_configuration());
    }
}
