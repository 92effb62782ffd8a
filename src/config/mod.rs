use crate::core::Options;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    pub redirect_limit: usize,
    pub max_body_bytes: u64,
    /// URLs extracted at once by batch operations.
    pub concurrency: usize,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: format!("essence/{}", env!("CARGO_PKG_VERSION")),
            timeout: 30,
            redirect_limit: 10,
            max_body_bytes: 5 * 1024 * 1024,
            concurrency: 1,
            max_width: None,
            max_height: None,
        }
    }
}

impl Config {
    /// Reads `path` as TOML, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Per-call extraction options derived from this configuration.
    pub fn options(&self) -> Options {
        Options {
            prepare: None,
            html: None,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml("timeout = 5\nmax_width = 640\n").unwrap();

        assert_eq!(config.timeout, 5);
        assert_eq!(config.max_width, Some(640));
        assert_eq!(config.redirect_limit, Config::default().redirect_limit);
        assert_eq!(config.options().max_width, Some(640));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::from_toml("retries = 3\n").is_err());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
