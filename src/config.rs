use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::Context;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Application configuration
///
/// Loaded once at startup and shared read-only with every request.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source, falling back to
    /// the defaults for unset variables
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            openai_api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            openai_base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            model: lookup("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: parse_var(&lookup, "OPENAI_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_var(&lookup, "OPENAI_MAX_TOKENS", defaults.max_tokens)?,
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn parse_var<T>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got '{}'", name, raw)),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            max_body_bytes: 64 * 1024,
        }
    }
}

// The key must never reach the logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "***API_KEY***"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            openai_api_key: Some("sk-secret-value".to_string()),
            ..Config::default()
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret-value"));
        assert!(rendered.contains("***API_KEY***"));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = Config::from_lookup(vars(&[
            ("PORT", "3000"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4.1"),
            ("OPENAI_MAX_TOKENS", " 512 "),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = Config::from_lookup(vars(&[("OPENAI_API_KEY", "   ")])).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_invalid_port_is_startup_error() {
        let err = Config::from_lookup(vars(&[("PORT", "abc")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(Config::from_lookup(vars(&[("PORT", "70000")])).is_err());
        assert!(Config::from_lookup(vars(&[("OPENAI_TEMPERATURE", "warm")])).is_err());
    }

    #[test]
    fn test_default_addresses() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server_url(), "http://0.0.0.0:8080");
        assert!(!config.has_api_key());
    }
}
