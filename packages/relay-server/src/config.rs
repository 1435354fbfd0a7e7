use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_TEST_MODEL: &str = "claude-3-5-haiku-20241022";

/// Relay configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub anthropic_version: String,
    /// Model used by the key check endpoint
    pub test_model: String,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
            test_model: DEFAULT_TEST_MODEL.to_string(),
            upstream_timeout: Duration::from_secs(120),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_source(|name| env::var(name).ok())
    }

    pub fn from_source<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| var(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            port: match var("PORT") {
                Some(port) => port.trim().parse().context("PORT must be a valid number")?,
                None => defaults.port,
            },
            upstream_url: var("UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            anthropic_version: var("ANTHROPIC_VERSION").unwrap_or(defaults.anthropic_version),
            test_model: var("TEST_MODEL").unwrap_or(defaults.test_model),
            upstream_timeout: match var("UPSTREAM_TIMEOUT_SECS") {
                Some(secs) => Duration::from_secs(
                    secs.trim()
                        .parse()
                        .context("UPSTREAM_TIMEOUT_SECS must be a number of seconds")?,
                ),
                None => defaults.upstream_timeout,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_source(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn test_port_override_and_validation() {
        let config = Config::from_source(|name| (name == "PORT").then(|| "8088".into())).unwrap();
        assert_eq!(config.port, 8088);

        let err = Config::from_source(|name| (name == "PORT").then(|| "http".into())).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
