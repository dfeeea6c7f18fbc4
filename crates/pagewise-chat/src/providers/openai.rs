//! OpenAI chat completions (also used for OpenAI-compatible custom endpoints).
//!
//! Roles map one to one: `user` → `user`, `assistant` → `assistant`. A fixed
//! system prompt is sent ahead of the history.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ProviderAdapter;
use crate::config::Endpoint;
use crate::types::{ChatMessage, Role};

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Provide clear, concise, \
     and accurate responses. Format code with markdown code blocks.";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    label: &'static str,
    base_url: String,
    model: String,
}

impl OpenAiAdapter {
    pub fn new(endpoint: &Endpoint) -> Self {
        Self::labelled("OpenAI", endpoint)
    }

    /// OpenAI-compatible endpoint configured by the operator.
    pub fn custom(endpoint: &Endpoint) -> Self {
        Self::labelled("Custom provider", endpoint)
    }

    fn labelled(label: &'static str, endpoint: &Endpoint) -> Self {
        Self {
            label,
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ProviderAdapter for OpenAiAdapter {
    type Message = OpenAiMessage;
    type Body = OpenAiRequest;

    fn name(&self) -> &'static str {
        self.label
    }

    fn native_role(role: Role) -> &'static str {
        match role {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    fn canonical_role(native: &str) -> Option<Role> {
        match native {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    fn translate_history(&self, history: &[ChatMessage], message: &str) -> Vec<OpenAiMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);

        messages.push(OpenAiMessage {
            role: "system".into(),
            content: SYSTEM_PROMPT.into(),
        });

        for msg in history {
            messages.push(OpenAiMessage {
                role: Self::native_role(msg.role).into(),
                content: msg.content.clone(),
            });
        }

        messages.push(OpenAiMessage {
            role: Self::native_role(Role::User).into(),
            content: message.to_string(),
        });

        messages
    }

    fn build_request_body(&self, messages: Vec<OpenAiMessage>) -> OpenAiRequest {
        OpenAiRequest {
            model: self.model.clone(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    fn request(&self, client: &Client, credential: Option<&str>) -> RequestBuilder {
        let req = client.post(format!("{}/chat/completions", self.base_url));
        match credential {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    fn extract_text(envelope: &Value) -> Option<String> {
        envelope["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
    }
}
