//! Relay dispatcher: validate, resolve credential, pick adapter, call it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error};

use pagewise_core::{Error, Result};

use crate::config::ProviderConfig;
use crate::providers::Adapter;
use crate::types::{ChatRequest, ChatResponse, ErrorReport, ReportKind};

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const CREDENTIAL_REQUIRED: &str =
    "API key is required. Please configure it in the extension settings or .env file";

/// Single entry point for chat requests. Cheap to clone; holds no per-request state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Arc<ProviderConfig>,
    client: Client,
}

impl Dispatcher {
    /// Build a dispatcher whose upstream calls give up after `timeout`.
    pub fn new(config: Arc<ProviderConfig>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: Arc<ProviderConfig>, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Credential for `request`: its own `apiKey` first, then the provider default.
    ///
    /// Fails with `Configuration` when the provider needs one and none is found.
    pub fn resolve_credential<'a>(&'a self, request: &'a ChatRequest) -> Result<Option<&'a str>> {
        let credential = request
            .credential
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| self.config.default_credential(request.provider));

        if credential.is_none() && request.provider.requires_credential() {
            return Err(Error::Configuration(CREDENTIAL_REQUIRED.into()));
        }
        Ok(credential)
    }

    /// Handle one chat turn. Never returns an adapter-specific error.
    pub async fn handle_chat(
        &self,
        request: ChatRequest,
    ) -> std::result::Result<ChatResponse, ErrorReport> {
        if request.message.is_empty() {
            return Err(report(&Error::Validation(MESSAGE_REQUIRED.into())));
        }

        let credential = self.resolve_credential(&request).map_err(|e| report(&e))?;
        let adapter = Adapter::for_provider(request.provider, &self.config);

        debug!(
            "Dispatching chat to {} ({} history messages)",
            adapter.name(),
            request.history.len()
        );

        match adapter
            .call(&self.client, &request.message, &request.history, credential)
            .await
        {
            Ok(text) => Ok(ChatResponse { text }),
            Err(e) => {
                error!(kind = e.kind(), provider = adapter.name(), "Chat request failed: {:?}", e);
                Err(report(&e))
            }
        }
    }
}

/// Flatten any error into the caller-facing report.
pub fn report(err: &Error) -> ErrorReport {
    let kind = match err {
        Error::Validation(_) => ReportKind::ValidationError,
        Error::Configuration(_) => ReportKind::ConfigurationError,
        _ => ReportKind::RequestFailed,
    };
    ErrorReport {
        kind,
        message: err.to_string(),
    }
}
