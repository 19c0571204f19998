use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::model::gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Server settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    pub gemini: GeminiConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("PORT").unwrap_or_else(|| "3000".to_string());
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                var: "HOST/PORT",
                value: format!("{}:{}", host, port),
            })?;

        let api_key = var("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let timeout = match var("GENERATION_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    var: "GENERATION_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => Duration::from_secs(60),
        };

        Ok(Self {
            addr,
            static_dir: var("STATIC_DIR").unwrap_or_else(|| "static".to_string()).into(),
            gemini: GeminiConfig {
                api_key,
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("GEMINI_API_KEY", "secret")]).unwrap();
        assert_eq!(config.addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.gemini.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.gemini.timeout, Duration::from_secs(60));
    }

    #[test]
    fn api_key_is_required() {
        let err = load(&[("PORT", "8080")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GEMINI_API_KEY"));

        let err = load(&[("GEMINI_API_KEY", "  ")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GEMINI_API_KEY"));
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("GEMINI_API_KEY", "secret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GENERATION_TIMEOUT_SECS", "15"),
        ])
        .unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout, Duration::from_secs(15));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = load(&[("GEMINI_API_KEY", "k"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "HOST/PORT", .. }));

        let err = load(&[("GEMINI_API_KEY", "k"), ("GENERATION_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "GENERATION_TIMEOUT_SECS", .. }));
    }
}
