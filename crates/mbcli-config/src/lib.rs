// SPDX-License-Identifier: GPL-3.0-or-later
use std::time::Duration;

use anyhow::Result;
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment prefix for overrides, e.g. `MBCLI_MUSICBRAINZ__RATE_LIMIT_MS=1500`.
pub const ENV_PREFIX: &str = "MBCLI_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicBrainzConfig {
    /// Web service root; the client default is used when unset.
    pub base_url: Option<String>,
    /// Identifying `User-Agent`; the client default is used when unset.
    pub user_agent: Option<String>,
    pub rate_limit_ms: u64,
    pub timeout_secs: u64,
}

impl MusicBrainzConfig {
    pub fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            rate_limit_ms: 1000,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub musicbrainz: MusicBrainzConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from compiled-in defaults and environment overrides (prefix: MBCLI_).
pub fn load() -> Result<AppConfig> {
    let figment = Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: AppConfig = figment.extract()?;
    debug!(target: "config", "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = load().expect("defaults load");
            assert_eq!(config.musicbrainz.base_url, None);
            assert_eq!(config.musicbrainz.rate_limit_interval(), Duration::from_secs(1));
            assert_eq!(config.musicbrainz.timeout(), Duration::from_secs(30));
            assert_eq!(config.telemetry.log_level, "warn");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("MBCLI_MUSICBRAINZ__BASE_URL", "http://127.0.0.1:8080/ws/2");
            jail.set_env("MBCLI_MUSICBRAINZ__RATE_LIMIT_MS", "1500");
            jail.set_env("MBCLI_TELEMETRY__LOG_LEVEL", "debug");

            let config = load().expect("overrides load");
            assert_eq!(
                config.musicbrainz.base_url.as_deref(),
                Some("http://127.0.0.1:8080/ws/2")
            );
            assert_eq!(
                config.musicbrainz.rate_limit_interval(),
                Duration::from_millis(1500)
            );
            assert_eq!(config.musicbrainz.timeout_secs, 30);
            assert_eq!(config.telemetry.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("MBCLI_MUSICBRAINZ__TIMEOUT_SECS", "soon");
            assert!(load().is_err());
            Ok(())
        });
    }
}
