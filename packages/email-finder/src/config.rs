use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use hunter_client::ApiKey;

use crate::batch::{BatchOptions, DEFAULT_DELAY};
use crate::lookup::DEFAULT_LIMIT;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_OUTPUT_DIR: &str = "output";

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Required for lookups; `parse` and `export` work without it
    pub api_key: Option<ApiKey>,
    pub base_url: String,
    pub delay: Duration,
    pub limit: u32,
    pub timeout: Duration,
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_source(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_source<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_key: var("HUNTER_API_KEY").map(|k| ApiKey::new(k.trim())),
            base_url: var("HUNTER_BASE_URL")
                .unwrap_or_else(|| hunter_client::DEFAULT_BASE_URL.to_string()),
            delay: match var("LOOKUP_DELAY_MS") {
                Some(ms) => Duration::from_millis(
                    ms.trim()
                        .parse()
                        .context("LOOKUP_DELAY_MS must be a number of milliseconds")?,
                ),
                None => DEFAULT_DELAY,
            },
            limit: match var("LOOKUP_LIMIT") {
                Some(limit) => limit
                    .trim()
                    .parse()
                    .context("LOOKUP_LIMIT must be a positive number")?,
                None => DEFAULT_LIMIT,
            },
            timeout: Duration::from_secs(match var("LOOKUP_TIMEOUT_SECS") {
                Some(secs) => secs
                    .trim()
                    .parse()
                    .context("LOOKUP_TIMEOUT_SECS must be a number of seconds")?,
                None => DEFAULT_TIMEOUT_SECS,
            }),
            output_dir: var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            delay: self.delay,
            limit: self.limit,
        }
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&ApiKey> {
        self.api_key
            .as_ref()
            .context("HUNTER_API_KEY must be set to run lookups")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://api.hunter.io/v2");
        assert_eq!(config.delay, Duration::from_millis(1000));
        assert_eq!(config.limit, 10);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HUNTER_API_KEY", " secret "),
            ("LOOKUP_DELAY_MS", "250"),
            ("LOOKUP_LIMIT", "25"),
            ("OUTPUT_DIR", "/tmp/exports"),
        ])
        .unwrap();

        assert_eq!(config.require_api_key().unwrap().expose(), "secret");
        assert_eq!(
            config.batch_options(),
            BatchOptions {
                delay: Duration::from_millis(250),
                limit: 25
            }
        );
        assert_eq!(config.output_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = load(&[("HUNTER_API_KEY", "   ")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_debug_hides_key() {
        let config = load(&[("HUNTER_API_KEY", "hunter-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("hunter-secret"));
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[("LOOKUP_DELAY_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("LOOKUP_DELAY_MS"));
    }
}
