//! Provider endpoints, models and default credentials.

use std::fmt;

use tracing::{info, warn};

use crate::types::{ChatStatus, ProviderKind, ProviderStatus};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Where and how to reach one provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub model: String,
    /// Credential used when a request does not carry its own.
    pub api_key: Option<String>,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Process-wide provider table. Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub openai: Endpoint,
    pub gemini: Endpoint,
    /// OpenAI-compatible endpoint for self-hosted or third-party models.
    pub custom: Endpoint,
    pub default_provider: ProviderKind,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openai: Endpoint::new(OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL),
            gemini: Endpoint::new(GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL),
            custom: Endpoint::new(OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL),
            default_provider: ProviderKind::OpenAI,
        }
    }
}

impl ProviderConfig {
    /// Load from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self::from_lookup(pagewise_core::config::env_lookup)
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_base = get("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.into());
        let openai_model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());

        let mut openai = Endpoint::new(openai_base.clone(), openai_model.clone());
        openai.api_key = get("OPENAI_API_KEY");

        let mut gemini = Endpoint::new(
            get("GEMINI_BASE_URL").unwrap_or_else(|| GEMINI_BASE_URL.into()),
            get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
        );
        gemini.api_key = get("GEMINI_API_KEY");

        let mut custom = Endpoint::new(
            get("CUSTOM_BASE_URL").unwrap_or(openai_base),
            get("CUSTOM_MODEL").unwrap_or(openai_model),
        );
        custom.api_key = get("CUSTOM_API_KEY");

        let default_provider = get("PAGEWISE_DEFAULT_PROVIDER")
            .map(|p| ProviderKind::parse_or_default(&p))
            .unwrap_or_default();

        let config = Self {
            openai,
            gemini,
            custom,
            default_provider,
        };
        config.log_summary();
        config
    }

    pub fn endpoint(&self, provider: ProviderKind) -> &Endpoint {
        match provider {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Custom => &self.custom,
        }
    }

    /// Credential configured for the provider, if any.
    pub fn default_credential(&self, provider: ProviderKind) -> Option<&str> {
        self.endpoint(provider).api_key.as_deref()
    }

    /// Build the public status response (no API keys exposed).
    pub fn status(&self) -> ChatStatus {
        ChatStatus {
            default_provider: self.default_provider,
            providers: ProviderKind::ALL
                .iter()
                .map(|&provider| ProviderStatus {
                    provider,
                    model: self.endpoint(provider).model.clone(),
                    configured: self.default_credential(provider).is_some()
                        || !provider.requires_credential(),
                    requires_api_key: provider.requires_credential(),
                })
                .collect(),
        }
    }

    fn log_summary(&self) {
        for provider in [ProviderKind::OpenAI, ProviderKind::Gemini] {
            if self.default_credential(provider).is_some() {
                info!("Default {} credential configured", provider);
            }
        }
        if self.openai.api_key.is_none() && self.gemini.api_key.is_none() {
            warn!(
                "No default provider credentials configured. \
                 Set OPENAI_API_KEY or GEMINI_API_KEY, or send apiKey with each request."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::from_lookup(|_| None);
        assert_eq!(config, ProviderConfig::default());
        assert_eq!(config.openai.base_url, OPENAI_BASE_URL);
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert!(config.default_credential(ProviderKind::OpenAI).is_none());
    }

    #[test]
    fn test_credentials_are_per_provider() {
        let config = ProviderConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("GEMINI_API_KEY", "g-key"),
        ]));
        assert_eq!(config.default_credential(ProviderKind::OpenAI), Some("sk-openai"));
        assert_eq!(config.default_credential(ProviderKind::Gemini), Some("g-key"));
        assert_eq!(config.default_credential(ProviderKind::Custom), None);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = ProviderConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "  "),
            ("OPENAI_MODEL", ""),
        ]));
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.openai.model, DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn test_custom_inherits_openai_endpoint() {
        let config = ProviderConfig::from_lookup(lookup_from(&[
            ("OPENAI_BASE_URL", "http://localhost:11434/v1/"),
            ("OPENAI_MODEL", "llama3"),
            ("PAGEWISE_DEFAULT_PROVIDER", "gemini"),
        ]));
        assert_eq!(config.custom.base_url, "http://localhost:11434/v1");
        assert_eq!(config.custom.model, "llama3");
        assert_eq!(config.default_provider, ProviderKind::Gemini);
    }

    #[test]
    fn test_status_hides_keys() {
        let config = ProviderConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "secret")]));
        let status = config.status();
        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("secret"));

        let gemini = status
            .providers
            .iter()
            .find(|p| p.provider == ProviderKind::Gemini)
            .unwrap();
        assert!(gemini.configured);
        let custom = status
            .providers
            .iter()
            .find(|p| p.provider == ProviderKind::Custom)
            .unwrap();
        assert!(custom.configured);
        assert!(!custom.requires_api_key);
    }

    #[test]
    fn test_debug_redacts_key() {
        let endpoint = Endpoint::new(OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL).with_api_key("sk-live");
        let rendered = format!("{:?}", endpoint);
        assert!(!rendered.contains("sk-live"));
        assert!(rendered.contains("<redacted>"));
    }
}
