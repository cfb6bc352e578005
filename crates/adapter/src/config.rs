//! Viewer configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_MAX_PENDING: usize = 32;
pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("invalid listen address {0:?}")]
    Address(String),
}

/// Which mount the viewer renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Term,
    Html,
    Json,
}

impl Backend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "term" | "terminal" => Some(Self::Term),
            "html" => Some(Self::Html),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending: usize,
    pub backend: Backend,
    pub assets_dir: PathBuf,
    pub html_out: PathBuf,
    pub frame_interval: Duration,
    /// Append every received line to this file.
    pub record_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_pending: DEFAULT_MAX_PENDING,
            backend: Backend::default(),
            assets_dir: PathBuf::from("assets"),
            html_out: PathBuf::from("arena.html"),
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
            record_path: None,
        }
    }
}

impl ViewerConfig {
    /// Read `ARENA_VIEW_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(host) = get("ARENA_VIEW_HOST") {
            config.host = host;
        }
        if let Some(v) = get("ARENA_VIEW_PORT") {
            config.port = parse("ARENA_VIEW_PORT", v)?;
        }
        if let Some(v) = get("ARENA_VIEW_MAX_PENDING") {
            config.max_pending = parse::<usize>("ARENA_VIEW_MAX_PENDING", v)?.max(1);
        }
        if let Some(v) = get("ARENA_VIEW_BACKEND") {
            config.backend = Backend::parse(&v).ok_or(ConfigError::Invalid {
                var: "ARENA_VIEW_BACKEND",
                value: v,
            })?;
        }
        if let Some(v) = get("ARENA_VIEW_ASSETS") {
            config.assets_dir = PathBuf::from(v);
        }
        if let Some(v) = get("ARENA_VIEW_HTML_OUT") {
            config.html_out = PathBuf::from(v);
        }
        if let Some(v) = get("ARENA_VIEW_FRAME_MS") {
            config.frame_interval = Duration::from_millis(parse("ARENA_VIEW_FRAME_MS", v)?);
        }
        config.record_path = get("ARENA_VIEW_RECORD").map(PathBuf::from);

        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Address(addr))
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ViewerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ViewerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = config(&[]).unwrap();
        assert_eq!(c, ViewerConfig::default());
        assert_eq!(c.socket_addr().unwrap().port(), DEFAULT_PORT);
    }

    #[test]
    fn reads_overrides() {
        let c = config(&[
            ("ARENA_VIEW_HOST", "0.0.0.0"),
            ("ARENA_VIEW_PORT", "9000"),
            ("ARENA_VIEW_BACKEND", "HTML"),
            ("ARENA_VIEW_MAX_PENDING", "0"),
            ("ARENA_VIEW_FRAME_MS", "33"),
            ("ARENA_VIEW_RECORD", "ticks.jsonl"),
        ])
        .unwrap();
        assert_eq!(c.socket_addr().unwrap().to_string(), "0.0.0.0:9000");
        assert_eq!(c.backend, Backend::Html);
        assert_eq!(c.max_pending, 1);
        assert_eq!(c.frame_interval, Duration::from_millis(33));
        assert_eq!(c.record_path, Some(PathBuf::from("ticks.jsonl")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let c = config(&[("ARENA_VIEW_PORT", "  "), ("ARENA_VIEW_RECORD", "")]).unwrap();
        assert_eq!(c.port, DEFAULT_PORT);
        assert_eq!(c.record_path, None);
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            config(&[("ARENA_VIEW_PORT", "seventy")]),
            Err(ConfigError::Invalid {
                var: "ARENA_VIEW_PORT",
                value: "seventy".to_string()
            })
        );
        assert!(config(&[("ARENA_VIEW_BACKEND", "svg")]).is_err());

        let c = config(&[("ARENA_VIEW_HOST", "not a host")]).unwrap();
        assert!(matches!(c.socket_addr(), Err(ConfigError::Address(_))));
    }
}
