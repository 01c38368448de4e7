use std::fmt;

use anyhow::{Context, Result};

pub const DEFAULT_RESUME_URL: &str =
    "https://mylatestcv.s3.ap-south-1.amazonaws.com/Naman_Kansal.pdf";
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Gemini API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for an empty key.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Application configuration loaded from environment variables.
/// A missing Gemini key is not fatal at startup; every request fails instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<ApiKey>,
    pub resume_url: String,
    pub gemini_api_url: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY").and_then(ApiKey::new),
            resume_url: or_default("RESUME_URL", DEFAULT_RESUME_URL),
            gemini_api_url: or_default("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            host: or_default("HOST", "0.0.0.0"),
            port: or_default("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.resume_url, DEFAULT_RESUME_URL);
        assert_eq!(config.gemini_api_url, DEFAULT_GEMINI_API_URL);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_empty_api_key_is_absent() {
        let config = config_from(&[("GEMINI_API_KEY", "")]).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_only_empty_key_is_rejected() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new(" ").is_some());
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let config = config_from(&[("GEMINI_API_KEY", "secret-key")]).unwrap();
        assert_eq!(config.gemini_api_key.as_ref().unwrap().expose(), "secret-key");
        assert!(!format!("{config:?}").contains("secret-key"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }
}
