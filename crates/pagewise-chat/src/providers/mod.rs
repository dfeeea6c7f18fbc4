//! Provider adapters.
//!
//! Each adapter translates canonical history into its provider's wire format
//! and pulls the reply text out of the provider's envelope. The HTTP exchange
//! itself is shared by all adapters in [`call`].

pub mod gemini;
pub mod openai;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use pagewise_core::{Error, Result};

use crate::config::ProviderConfig;
use crate::types::{ChatMessage, ProviderKind, Role};

pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;

/// Translation capabilities of one provider's chat API.
pub trait ProviderAdapter: Sync {
    /// One entry of the provider's message sequence.
    type Message: Serialize + Send;
    /// Full request body.
    type Body: Serialize + Send + Sync;

    /// Human-readable provider name used in error messages.
    fn name(&self) -> &'static str;

    /// Provider label for a canonical role.
    fn native_role(role: Role) -> &'static str;

    /// Inverse of [`ProviderAdapter::native_role`].
    fn canonical_role(native: &str) -> Option<Role>;

    /// Translate history in order, then append `message` as the final user turn.
    fn translate_history(&self, history: &[ChatMessage], message: &str) -> Vec<Self::Message>;

    fn build_request_body(&self, messages: Vec<Self::Message>) -> Self::Body;

    /// Target URL and auth for one call. `credential` is never empty.
    fn request(&self, client: &Client, credential: Option<&str>) -> RequestBuilder;

    /// First completion's text, if the envelope has the expected shape.
    fn extract_text(envelope: &Value) -> Option<String>;
}

/// Send one chat turn through `adapter` and return the reply text.
pub async fn call<A: ProviderAdapter>(
    adapter: &A,
    client: &Client,
    message: &str,
    history: &[ChatMessage],
    credential: Option<&str>,
) -> Result<String> {
    let provider = adapter.name();
    let credential = credential.filter(|c| !c.is_empty());

    let messages = adapter.translate_history(history, message);
    let body = adapter.build_request_body(messages);

    debug!(
        "Calling {} with {} history messages",
        provider,
        history.len()
    );

    let response = adapter
        .request(client, credential)
        .json(&body)
        .send()
        .await
        .map_err(|e| transport_error(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        // Error bodies are best-effort: a non-JSON body still yields a message.
        let body: Option<Value> = response.json().await.ok();
        let message = body
            .as_ref()
            .and_then(upstream_error_message)
            .unwrap_or_else(|| format!("{} API error", provider));
        warn!("{} API returned {}: {}", provider, status, message);
        return Err(Error::ProviderApi {
            provider,
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Value = response.json().await.map_err(|e| {
        if e.is_decode() {
            Error::ProviderResponse { provider }
        } else {
            transport_error(provider, e)
        }
    })?;

    A::extract_text(&envelope).ok_or(Error::ProviderResponse { provider })
}

/// `.error.message` as returned by both OpenAI and Gemini.
fn upstream_error_message(body: &Value) -> Option<String> {
    body["error"]["message"]
        .as_str()
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
}

fn transport_error(provider: &'static str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout { provider }
    } else {
        Error::Transport {
            provider,
            detail: err.to_string(),
        }
    }
}

/// Closed set of adapters the relay can dispatch to.
#[derive(Debug, Clone)]
pub enum Adapter {
    OpenAi(OpenAiAdapter),
    Gemini(GeminiAdapter),
}

impl Adapter {
    /// Adapter for `provider`. `custom` speaks the OpenAI wire format against
    /// its own endpoint.
    pub fn for_provider(provider: ProviderKind, config: &ProviderConfig) -> Self {
        match provider {
            ProviderKind::OpenAI => Self::OpenAi(OpenAiAdapter::new(&config.openai)),
            ProviderKind::Gemini => Self::Gemini(GeminiAdapter::new(&config.gemini)),
            ProviderKind::Custom => Self::OpenAi(OpenAiAdapter::custom(&config.custom)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(a) => a.name(),
            Self::Gemini(a) => a.name(),
        }
    }

    pub async fn call(
        &self,
        client: &Client,
        message: &str,
        history: &[ChatMessage],
        credential: Option<&str>,
    ) -> Result<String> {
        match self {
            Self::OpenAi(a) => call(a, client, message, history, credential).await,
            Self::Gemini(a) => call(a, client, message, history, credential).await,
        }
    }
}
