//! Runtime configuration
//!
//! Every field has a default, so an empty YAML file (or no file at all) is a
//! valid configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub latency: LatencyConfig,

    /// Base URL of the REST fallback; the in-process route is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

impl Config {
    /// Read a YAML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // serde_yaml reads an empty document as null
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                message: "server.host must not be empty".into(),
            });
        }
        if let Some(url) = &self.fallback_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::ConfigInvalid {
                    message: format!("fallback_url must be an http(s) URL, got '{}'", url),
                });
            }
        }
        Ok(())
    }

    /// The fallback base URL without a trailing slash
    pub fn fallback_url(&self) -> Option<&str> {
        self.fallback_url.as_deref().map(|url| url.trim_end_matches('/'))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 4000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Simulated latencies, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_resolver_ms")]
    pub resolver_ms: u64,

    #[serde(default = "default_rest_ms")]
    pub rest_ms: u64,
}

fn default_resolver_ms() -> u64 {
    500
}

fn default_rest_ms() -> u64 {
    300
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            resolver_ms: default_resolver_ms(),
            rest_ms: default_rest_ms(),
        }
    }
}

impl LatencyConfig {
    /// No simulated delay on either path
    pub const NONE: LatencyConfig = LatencyConfig {
        resolver_ms: 0,
        rest_ms: 0,
    };

    pub fn resolver(&self) -> Duration {
        Duration::from_millis(self.resolver_ms)
    }

    pub fn rest(&self) -> Duration {
        Duration::from_millis(self.rest_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
        assert!(!config.server.cors_origins.is_empty());
        assert_eq!(config.latency.resolver(), Duration::from_millis(500));
        assert_eq!(config.latency.rest(), Duration::from_millis(300));
        assert!(config.fallback_url().is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_yaml() {
        let config = Config::from_yaml(
            "server:\n  port: 9000\nlatency:\n  rest_ms: 10\nfallback_url: http://localhost:9000/\n",
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.latency.resolver_ms, 500);
        assert_eq!(config.latency.rest_ms, 10);
        assert_eq!(config.fallback_url(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_fallback_url() {
        let err = Config::from_yaml("fallback_url: ftp://example.com\n").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Config::from_yaml("server: [1, 2").unwrap_err();
        assert!(matches!(err, Error::YamlParseError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "latency:\n  resolver_ms: 0\n  rest_ms: 0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.latency, LatencyConfig::NONE);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::ConfigReadError { .. }));
        assert!(err.suggestion().is_some());
    }
}
