//! Chat types matching the extension's relay API surface.

use serde::{Deserialize, Deserializer, Serialize};

/// LLM provider identifier.
///
/// Deserialization never fails on an unknown name: anything other than
/// `gemini` or `custom` (including a missing or `null` value) selects OpenAI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    Gemini,
    Custom,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::OpenAI, Self::Gemini, Self::Custom];

    /// Parse a provider name, falling back to OpenAI.
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gemini" => Self::Gemini,
            "custom" => Self::Custom,
            _ => Self::OpenAI,
        }
    }

    /// Whether a request for this provider must carry a credential.
    pub fn requires_credential(self) -> bool {
        !matches!(self, Self::Custom)
    }
}

impl From<Option<String>> for ProviderKind {
    fn from(name: Option<String>) -> Self {
        name.as_deref().map(Self::parse_or_default).unwrap_or_default()
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAI => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Custom => write!(f, "custom"),
        }
    }
}

/// Speaker of a canonical chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Chat message in conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Incoming chat request (`POST /api/chat`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(
        default,
        rename = "conversationHistory",
        deserialize_with = "null_as_default"
    )]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default, rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Successful dispatcher result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub text: String,
}

/// Category of a failed chat, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    ValidationError,
    ConfigurationError,
    RequestFailed,
}

/// Uniform failure shape produced by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ReportKind,
    pub message: String,
}

/// `200` body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// `4xx`/`5xx` body of the relay API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Context-menu action request (`POST /api/chat/action`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default, rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

/// Per-provider entry of the status response (keys never included).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub provider: ProviderKind,
    pub model: String,
    pub configured: bool,
    #[serde(rename = "requiresApiKey")]
    pub requires_api_key: bool,
}

/// `GET /api/chat/status` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStatus {
    #[serde(rename = "defaultProvider")]
    pub default_provider: ProviderKind,
    pub providers: Vec<ProviderStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.history.is_empty());
        assert_eq!(req.provider, ProviderKind::OpenAI);
        assert!(req.credential.is_none());
    }

    #[test]
    fn test_request_wire_names() {
        let req: ChatRequest = serde_json::from_str(
            r#"{
                "message": "and now?",
                "conversationHistory": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"}
                ],
                "provider": "gemini",
                "apiKey": "k-123"
            }"#,
        )
        .unwrap();
        assert_eq!(
            req.history,
            vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")]
        );
        assert_eq!(req.provider, ProviderKind::Gemini);
        assert_eq!(req.credential.as_deref(), Some("k-123"));
    }

    #[test]
    fn test_null_fields_treated_as_absent() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message": null, "conversationHistory": null, "provider": null}"#,
        )
        .unwrap();
        assert_eq!(req.message, "");
        assert!(req.history.is_empty());
        assert_eq!(req.provider, ProviderKind::OpenAI);
    }

    #[test]
    fn test_unknown_provider_falls_back_to_openai() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "x", "provider": "sql"}"#).unwrap();
        assert_eq!(req.provider, ProviderKind::OpenAI);
        assert_eq!(ProviderKind::parse_or_default(" Gemini "), ProviderKind::Gemini);
        assert_eq!(ProviderKind::parse_or_default("CUSTOM"), ProviderKind::Custom);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = serde_json::from_str::<ChatRequest>(
            r#"{"message": "x", "conversationHistory": [{"role": "system", "content": "s"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_request_serializes_wire_names() {
        let req = ChatRequest::new("hi")
            .with_history(vec![ChatMessage::user("earlier")])
            .with_provider(ProviderKind::Custom);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "hi");
        assert_eq!(json["conversationHistory"][0]["role"], "user");
        assert_eq!(json["provider"], "custom");
        assert!(json.get("apiKey").is_none());
    }

    #[test]
    fn test_report_kind_names() {
        let report = ErrorReport {
            kind: ReportKind::RequestFailed,
            message: "boom".into(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "RequestFailed");
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn test_provider_credential_requirement() {
        assert!(ProviderKind::OpenAI.requires_credential());
        assert!(ProviderKind::Gemini.requires_credential());
        assert!(!ProviderKind::Custom.requires_credential());
    }
}
