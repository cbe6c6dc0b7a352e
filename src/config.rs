//! Configuration loading: defaults, optional TOML file, environment.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where the documentation corpus lives and how patient we are with it.
///
/// Values merge in precedence order: built-in defaults, then an optional
/// `config.toml` in the platform config directory, then `DOCDEX_*`
/// environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the full corpus archive (ZIP).
    pub archive_url: String,
    /// URL answering with the latest content version identifier (JSON
    /// with a `sha` field).
    pub version_url: String,
    /// Override for the cache directory; platform default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Cache entry time-to-live, in hours.
    pub ttl_hours: u64,
    /// Minimum spacing between outbound version checks, in minutes.
    pub check_interval_minutes: u64,
    /// Timeout for the full archive download, in seconds.
    pub archive_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_url: "https://github.com/Roblox/creator-docs/archive/refs/heads/main.zip".to_string(),
            version_url: "https://api.github.com/repos/Roblox/creator-docs/commits/main".to_string(),
            cache_dir: None,
            ttl_hours: 24,
            check_interval_minutes: 60,
            archive_timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load the merged configuration.
    pub fn load() -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dirs) = directories::ProjectDirs::from("", "", "docdex") {
            figment = figment.merge(Toml::file(dirs.config_dir().join("config.toml")));
        }
        figment.merge(Env::prefixed("DOCDEX_")).extract().or_raise(|| ErrorKind::Config)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours * 60 * 60)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_minutes * 60)
    }

    pub fn archive_timeout(&self) -> Duration {
        Duration::from_secs(self.archive_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.ttl(), Duration::from_secs(24 * 60 * 60));
        assert_eq!(config.check_interval(), Duration::from_secs(60 * 60));
        assert_eq!(config.archive_timeout(), Duration::from_secs(60));
        assert!(config.archive_url.ends_with(".zip"));
    }

    #[test]
    fn later_providers_override_defaults() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string("ttl_hours = 48\narchive_url = \"https://example.invalid/docs.zip\""))
            .extract()
            .unwrap();
        assert_eq!(config.ttl_hours, 48);
        assert_eq!(config.archive_url, "https://example.invalid/docs.zip");
        // Untouched keys keep their defaults.
        assert_eq!(config.check_interval_minutes, 60);
    }
}
