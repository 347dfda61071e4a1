//! Dashboard configuration: TOML file plus environment overrides

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

const DEFAULT_LOCATION_SLUG: &str = "sivas";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REFRESH_SECS: u64 = 300;
const DEFAULT_TICK_MILLIS: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub location_slug: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RefreshConfig {
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatrixConfig {
    pub tick_millis: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub backend: Option<BackendConfig>,
    pub refresh: Option<RefreshConfig>,
    pub matrix: Option<MatrixConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid backend URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

impl AppConfig {
    /// Load from SPIKEWX_CONFIG path (TOML) if present, then apply
    /// environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SPIKEWX_CONFIG").unwrap_or_else(|_| "spikewx.toml".to_string());
        let cfg = if Path::new(&path).exists() {
            Self::from_path(&path)?
        } else {
            AppConfig::default()
        };
        cfg.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Ok(toml::from_str::<AppConfig>(&s)?)
    }

    /// Apply BACKEND_URL, REFRESH_INTERVAL and FETCH_TIMEOUT from `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BACKEND_URL").filter(|u| !u.trim().is_empty()) {
            self.backend.get_or_insert_with(Default::default).base_url = Some(url);
        }
        if let Some(v) = lookup("REFRESH_INTERVAL") {
            self.refresh.get_or_insert_with(Default::default).interval_secs =
                Some(parse_secs("REFRESH_INTERVAL", &v)?);
        }
        if let Some(v) = lookup("FETCH_TIMEOUT") {
            self.backend.get_or_insert_with(Default::default).timeout_secs =
                Some(parse_secs("FETCH_TIMEOUT", &v)?);
        }
        Ok(self)
    }

    /// Check URL and durations
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend_url()?;
        if self.fetch_timeout().is_zero() {
            return Err(ConfigError::Zero("backend.timeout_secs"));
        }
        if self.refresh_interval().is_zero() {
            return Err(ConfigError::Zero("refresh.interval_secs"));
        }
        if self.matrix_tick().is_zero() {
            return Err(ConfigError::Zero("matrix.tick_millis"));
        }
        Ok(())
    }

    /// Backend base URL; `None` runs the dashboard offline
    pub fn backend_url(&self) -> Result<Option<Url>, ConfigError> {
        let Some(raw) = self.backend.as_ref().and_then(|b| b.base_url.as_deref()) else {
            return Ok(None);
        };
        let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(Some(url)),
            other => Err(ConfigError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme {other}"),
            }),
        }
    }

    pub fn location_slug(&self) -> String {
        self.backend
            .as_ref()
            .and_then(|b| b.location_slug.clone())
            .unwrap_or_else(|| DEFAULT_LOCATION_SLUG.to_string())
    }

    pub fn fetch_timeout(&self) -> Duration {
        let secs = self
            .backend
            .as_ref()
            .and_then(|b| b.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        let secs = self
            .refresh
            .as_ref()
            .and_then(|r| r.interval_secs)
            .unwrap_or(DEFAULT_REFRESH_SECS);
        Duration::from_secs(secs)
    }

    pub fn matrix_tick(&self) -> Duration {
        let millis = self
            .matrix
            .as_ref()
            .and_then(|m| m.tick_millis)
            .unwrap_or(DEFAULT_TICK_MILLIS);
        Duration::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert!(cfg.backend_url().unwrap().is_none());
        assert_eq!(cfg.location_slug(), "sivas");
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(300));
        assert_eq!(cfg.matrix_tick(), Duration::from_millis(1000));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[backend]
base_url = "http://localhost:8001"
location_slug = "ankara"
timeout_secs = 3

[refresh]
interval_secs = 60

[matrix]
tick_millis = 250
"#
        )
        .unwrap();

        let cfg = AppConfig::from_path(file.path()).unwrap();
        assert_eq!(
            cfg.backend_url().unwrap().unwrap().as_str(),
            "http://localhost:8001/"
        );
        assert_eq!(cfg.location_slug(), "ankara");
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(60));
        assert_eq!(cfg.matrix_tick(), Duration::from_millis(250));
    }

    #[test]
    fn env_overrides_file_values() {
        let cfg: AppConfig = toml::from_str(
            r#"
[backend]
base_url = "http://file.example"
"#,
        )
        .unwrap();
        let cfg = cfg
            .with_env_overrides(env(&[
                ("BACKEND_URL", "https://env.example/station"),
                ("REFRESH_INTERVAL", "120"),
                ("FETCH_TIMEOUT", " 5 "),
            ]))
            .unwrap();

        assert_eq!(
            cfg.backend_url().unwrap().unwrap().as_str(),
            "https://env.example/station"
        );
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(120));
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn blank_backend_url_is_ignored() {
        let cfg = AppConfig::default()
            .with_env_overrides(env(&[("BACKEND_URL", "  ")]))
            .unwrap();
        assert!(cfg.backend_url().unwrap().is_none());
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::default()
            .with_env_overrides(env(&[("REFRESH_INTERVAL", "5m")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "REFRESH_INTERVAL", .. }));

        let cfg = AppConfig::default()
            .with_env_overrides(env(&[("BACKEND_URL", "ftp://example.org")]))
            .unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidUrl { .. })));

        let cfg = AppConfig::default()
            .with_env_overrides(env(&[("BACKEND_URL", "not a url")]))
            .unwrap();
        assert!(matches!(cfg.backend_url(), Err(ConfigError::InvalidUrl { .. })));

        let cfg = AppConfig::default()
            .with_env_overrides(env(&[("REFRESH_INTERVAL", "0")]))
            .unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Zero("refresh.interval_secs"))));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend\nbase_url = 1").unwrap();
        assert!(matches!(AppConfig::from_path(file.path()), Err(ConfigError::Toml(_))));
    }
}
