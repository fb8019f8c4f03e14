//! Startup configuration
//!
//! Loaded from a JSON file, validated once, then treated as immutable.
//! The signing secret may come from the environment instead of the file;
//! the externally reachable base URL must always be configured, never
//! assumed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides `jwt_secret`
pub const JWT_SECRET_ENV: &str = "DOCBRIDGE_JWT_SECRET";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadFailed(String),

    #[error("Invalid config JSON: {0}")]
    ParseFailed(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interface to bind (default "0.0.0.0")
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// Port to bind (default 5001)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Externally reachable base URL used in download and callback
    /// addresses handed to the engine (required)
    #[serde(default)]
    pub public_base_url: String,

    /// Pre-shared signing secret; `DOCBRIDGE_JWT_SECRET` overrides
    /// (required)
    #[serde(default)]
    pub jwt_secret: String,

    /// Signing algorithm (optional, default "HS256")
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,

    /// Signed-token lifetime in seconds (optional, default 30 minutes)
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    /// Principal session lifetime in seconds (optional, default 8 hours)
    #[serde(default = "default_principal_session_ttl_secs")]
    pub principal_session_ttl_secs: u64,

    /// Directory holding document files (optional, default "./docs")
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,

    /// Optional provisioning fixtures applied at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Whether downloads require a valid link token (optional, default
    /// true)
    #[serde(default = "default_verify_link_tokens")]
    pub verify_link_tokens: bool,

    /// Timeout for fetching saved content from the engine, in seconds
    /// (optional, default 30)
    #[serde(default = "default_save_fetch_timeout_secs")]
    pub save_fetch_timeout_secs: u64,

    /// Cap on fetched save content, in bytes (optional, default 64 MiB)
    #[serde(default = "default_save_fetch_max_bytes")]
    pub save_fetch_max_bytes: u64,

    /// Allowed CORS origins; empty means permissive (optional)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}
fn default_bind_port() -> u16 {
    5001
}
fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}
fn default_token_ttl_secs() -> u64 {
    1800
} // 30 minutes
fn default_principal_session_ttl_secs() -> u64 {
    28800
} // 8 hours
fn default_storage_root() -> PathBuf {
    PathBuf::from("./docs")
}
fn default_verify_link_tokens() -> bool {
    true
}
fn default_save_fetch_timeout_secs() -> u64 {
    30
}
fn default_save_fetch_max_bytes() -> u64 {
    67108864
} // 64 MiB

impl Default for AppConfig {
    /// Starter configuration: every default filled in, the two required
    /// values left empty so `validate` refuses to serve until they are
    /// set.
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            bind_port: default_bind_port(),
            public_base_url: String::new(),
            jwt_secret: String::new(),
            jwt_algorithm: default_jwt_algorithm(),
            token_ttl_secs: default_token_ttl_secs(),
            principal_session_ttl_secs: default_principal_session_ttl_secs(),
            storage_root: default_storage_root(),
            seed_path: None,
            verify_link_tokens: default_verify_link_tokens(),
            save_fetch_timeout_secs: default_save_fetch_timeout_secs(),
            save_fetch_max_bytes: default_save_fetch_max_bytes(),
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file, applying the environment override
    /// for the signing secret.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(format!("{}: {}", path.display(), e)))?;

        let mut config: AppConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;

        if let Ok(secret) = std::env::var(JWT_SECRET_ENV) {
            if !secret.is_empty() {
                config.jwt_secret = secret;
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "jwt_secret is required (set it in the config file or via {})",
                JWT_SECRET_ENV
            )));
        }

        if self.public_base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "public_base_url is required".to_string(),
            ));
        }

        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "public_base_url must start with http:// or https://, got '{}'",
                self.public_base_url
            )));
        }

        self.algorithm()?;

        if self.token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("token_ttl_secs must be > 0".to_string()));
        }

        if self.principal_session_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "principal_session_ttl_secs must be > 0".to_string(),
            ));
        }

        if self.save_fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "save_fetch_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.save_fetch_max_bytes == 0 {
            return Err(ConfigError::Invalid(
                "save_fetch_max_bytes must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Parse the configured signing algorithm. HMAC variants only: the
    /// secret is a shared symmetric key on both sides of the engine.
    pub fn algorithm(&self) -> ConfigResult<Algorithm> {
        match self.jwt_algorithm.as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(ConfigError::Invalid(format!(
                "Invalid jwt_algorithm: '{}'. Must be HS256, HS384 or HS512.",
                other
            ))),
        }
    }

    /// Signed-token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_ttl_secs as i64)
    }

    /// Principal session lifetime
    pub fn principal_session_ttl(&self) -> Duration {
        Duration::seconds(self.principal_session_ttl_secs as i64)
    }

    /// Bind address in `host:port` form
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.bind_port)
    }

    /// Public base URL with any trailing slash trimmed
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, content: &str) -> PathBuf {
        let path = temp_dir.path().join("docbridge.json");
        fs::write(&path, content).unwrap();
        path
    }

    fn valid_config() -> AppConfig {
        AppConfig {
            public_base_url: "http://localhost:5001".to_string(),
            jwt_secret: "s3cret".to_string(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"{"public_base_url": "http://localhost:5001", "jwt_secret": "s3cret"}"#,
        );

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.bind_host, "0.0.0.0");
        assert_eq!(config.bind_port, 5001);
        assert_eq!(config.jwt_algorithm, "HS256");
        assert_eq!(config.token_ttl_secs, 1800);
        assert_eq!(config.principal_session_ttl_secs, 28800);
        assert_eq!(config.storage_root, PathBuf::from("./docs"));
        assert!(config.seed_path.is_none());
        assert!(config.verify_link_tokens);
        assert_eq!(config.save_fetch_timeout_secs, 30);
        assert_eq!(config.save_fetch_max_bytes, 67108864);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "{not json");

        let result = AppConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = AppConfig::load(Path::new("/nonexistent/docbridge.json"));
        assert!(matches!(result, Err(ConfigError::ReadFailed(_))));
    }

    #[test]
    fn test_missing_secret_rejected() {
        let config = AppConfig {
            jwt_secret: String::new(),
            ..valid_config()
        };

        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_base_url_rejected() {
        let config = AppConfig {
            public_base_url: String::new(),
            ..valid_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_scheme_required() {
        let config = AppConfig {
            public_base_url: "localhost:5001".to_string(),
            ..valid_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_algorithm_parsing() {
        let mut config = valid_config();
        assert_eq!(config.algorithm().unwrap(), Algorithm::HS256);

        config.jwt_algorithm = "HS512".to_string();
        assert_eq!(config.algorithm().unwrap(), Algorithm::HS512);

        // Asymmetric algorithms make no sense with a shared secret
        config.jwt_algorithm = "RS256".to_string();
        assert!(config.algorithm().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = AppConfig {
            token_ttl_secs: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            save_fetch_max_bytes: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = AppConfig {
            public_base_url: "http://localhost:5001/".to_string(),
            ..valid_config()
        };

        assert_eq!(config.base_url(), "http://localhost:5001");
    }

    #[test]
    fn test_secret_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"{"public_base_url": "http://localhost:5001", "jwt_secret": "from-file"}"#,
        );

        std::env::set_var(JWT_SECRET_ENV, "from-env");
        let config = AppConfig::load(&path);
        std::env::remove_var(JWT_SECRET_ENV);

        assert_eq!(config.unwrap().jwt_secret, "from-env");
    }
}
