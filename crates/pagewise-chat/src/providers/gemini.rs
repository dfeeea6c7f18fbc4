//! Google Gemini `generateContent`.
//!
//! Gemini calls the assistant `model`: `user` → `user`, `assistant` → `model`.
//! The credential travels as the `key` query parameter.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ProviderAdapter;
use crate::config::Endpoint;
use crate::types::{ChatMessage, Role};

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiContent {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    base_url: String,
    model: String,
}

impl GeminiAdapter {
    pub fn new(endpoint: &Endpoint) -> Self {
        Self {
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
        }
    }

    /// Decode translated contents back into canonical history.
    ///
    /// Returns `None` if any entry carries a role outside the mapping.
    pub fn restore_history(contents: &[GeminiContent]) -> Option<Vec<ChatMessage>> {
        contents
            .iter()
            .map(|c| {
                Some(ChatMessage {
                    role: Self::canonical_role(&c.role)?,
                    content: c.parts.iter().map(|p| p.text.as_str()).collect(),
                })
            })
            .collect()
    }
}

impl ProviderAdapter for GeminiAdapter {
    type Message = GeminiContent;
    type Body = GenerateContentRequest;

    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn native_role(role: Role) -> &'static str {
        match role {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }

    fn canonical_role(native: &str) -> Option<Role> {
        match native {
            "user" => Some(Role::User),
            "model" => Some(Role::Assistant),
            _ => None,
        }
    }

    fn translate_history(&self, history: &[ChatMessage], message: &str) -> Vec<GeminiContent> {
        history
            .iter()
            .map(|msg| GeminiContent {
                role: Self::native_role(msg.role).into(),
                parts: vec![GeminiPart {
                    text: msg.content.clone(),
                }],
            })
            .chain(std::iter::once(GeminiContent {
                role: Self::native_role(Role::User).into(),
                parts: vec![GeminiPart {
                    text: message.to_string(),
                }],
            }))
            .collect()
    }

    fn build_request_body(&self, contents: Vec<GeminiContent>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    fn request(&self, client: &Client, credential: Option<&str>) -> RequestBuilder {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let req = client.post(url);
        match credential {
            Some(key) => req.query(&[("key", key)]),
            None => req,
        }
    }

    fn extract_text(envelope: &Value) -> Option<String> {
        envelope["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
    }
}
