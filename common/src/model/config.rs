//! Runtime configuration.
//!
//! The proxy services used to get around cross-origin restrictions are third
//! party endpoints, so they live here rather than in the code that calls them.
//! The front end reads an optional `config.json` and falls back to
//! [`AppConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::links::urls::encode_component;

/// Placeholder replaced by the percent-encoded target URL.
pub const URL_PLACEHOLDER: &str = "{url}";

/// A CORS-relaxing proxy, addressed by a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyEndpoint {
    /// Short name used in logs and as the fetch strategy name.
    pub name: String,
    /// URL template containing [`URL_PLACEHOLDER`].
    pub template: String,
}

impl ProxyEndpoint {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    /// Proxy URL that fetches `target`.
    pub fn url_for(&self, target: &str) -> String {
        self.template
            .replace(URL_PLACEHOLDER, &encode_component(target))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Proxy answering `{"contents": "<body>"}`, used to scrape the body of
    /// shortened links whose redirects the browser hides.
    pub resolver_proxy: ProxyEndpoint,
    /// Proxies tried in order after a direct Google Drive download fails.
    pub fetch_proxies: Vec<ProxyEndpoint>,
    pub default_duration_secs: u32,
    /// Delay between a successful load and the automatic start of playback.
    pub autoplay_delay_ms: u32,
    /// Length of the fade shown on every page change.
    pub transition_ms: u32,
    pub max_redirect_hops: usize,
    /// Probe non-Drive targets before opening the viewer.
    pub validate_reachability: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resolver_proxy: ProxyEndpoint::new("allorigins", "https://api.allorigins.win/get?url={url}"),
            fetch_proxies: vec![
                ProxyEndpoint::new("codetabs", "https://api.codetabs.com/v1/proxy?quest={url}"),
                ProxyEndpoint::new("corsproxy", "https://corsproxy.io/?{url}"),
            ],
            default_duration_secs: 5,
            autoplay_delay_ms: 2000,
            transition_ms: 500,
            max_redirect_hops: 5,
            validate_reachability: true,
        }
    }
}

impl AppConfig {
    /// Parses and validates a JSON document. Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for proxy in std::iter::once(&self.resolver_proxy).chain(&self.fetch_proxies) {
            if proxy.template.trim().is_empty() {
                return Err(ConfigError::EmptyProxyTemplate(proxy.name.clone()));
            }
            if !proxy.template.contains(URL_PLACEHOLDER) {
                return Err(ConfigError::MissingPlaceholder(proxy.name.clone()));
            }
        }
        if self.default_duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.max_redirect_hops == 0 {
            return Err(ConfigError::ZeroHops);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn proxy_url_encodes_the_target() {
        let proxy = ProxyEndpoint::new("corsproxy", "https://corsproxy.io/?{url}");
        assert_eq!(
            proxy.url_for("https://drive.google.com/uc?export=download&id=ABC"),
            "https://corsproxy.io/?https%3A%2F%2Fdrive.google.com%2Fuc%3Fexport%3Ddownload%26id%3DABC"
        );
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config = AppConfig::from_json_str(r#"{ "default_duration_secs": 8 }"#).unwrap();
        assert_eq!(config.default_duration_secs, 8);
        assert_eq!(config.fetch_proxies.len(), 2);
        assert_eq!(config.max_redirect_hops, 5);
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let json = r#"{ "fetch_proxies": [ { "name": "broken", "template": "https://proxy.example/" } ] }"#;
        assert!(matches!(
            AppConfig::from_json_str(json),
            Err(ConfigError::MissingPlaceholder(name)) if name == "broken"
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_json_str("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
