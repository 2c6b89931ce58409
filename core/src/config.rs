//! Client configuration loaded from the environment.

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Applied by transports that support timeouts.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Reads `CAREER_API_URL` (or the legacy `REACT_APP_API_URL`) and
    /// `CAREER_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup("CAREER_API_URL")
            .or_else(|| lookup("REACT_APP_API_URL"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("CAREER_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ApiError::Config(format!("CAREER_API_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self { base_url, timeout_secs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn primary_variable_wins_over_legacy() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("CAREER_API_URL", "https://api.example.com"),
            ("REACT_APP_API_URL", "https://legacy.example.com"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url, "https://api.example.com");
    }

    #[test]
    fn legacy_variable_is_honoured() {
        let cfg = ClientConfig::from_lookup(lookup(&[("REACT_APP_API_URL", "https://legacy.example.com")])).unwrap();
        assert_eq!(cfg.base_url, "https://legacy.example.com");
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("CAREER_API_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("CAREER_API_TIMEOUT_SECS"));
    }
}
