//! Caller-owned conversation history.

use pagewise_chat::{ChatMessage, ChatRequest};

use crate::settings::Settings;

/// Turns exchanged so far in one chat window.
///
/// The message being sent is never part of the history it is sent with;
/// both sides of a turn are recorded only once the reply has arrived.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    history: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Build the request for `message` with the current history.
    pub fn request(&self, message: &str, settings: &Settings) -> ChatRequest {
        let request = ChatRequest::new(message)
            .with_history(self.history.clone())
            .with_provider(settings.api_provider);
        match settings.credential() {
            Some(key) => request.with_credential(key),
            None => request,
        }
    }

    /// Append a completed exchange.
    pub fn record(&mut self, message: &str, reply: &str) {
        self.history.push(ChatMessage::user(message));
        self.history.push(ChatMessage::assistant(reply));
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewise_chat::{ProviderKind, Role};

    #[test]
    fn test_request_excludes_current_message_from_history() {
        let mut conversation = Conversation::new();
        conversation.record("hi", "hello");

        let settings = Settings::default();
        let request = conversation.request("how are you?", &settings);
        assert_eq!(request.message, "how are you?");
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[1].role, Role::Assistant);
        assert!(request.history.iter().all(|m| m.content != "how are you?"));
    }

    #[test]
    fn test_request_carries_settings() {
        let settings = Settings {
            api_key: "g-key".into(),
            api_provider: ProviderKind::Gemini,
            ..Settings::default()
        };
        let request = Conversation::new().request("hi", &settings);
        assert_eq!(request.provider, ProviderKind::Gemini);
        assert_eq!(request.credential.as_deref(), Some("g-key"));

        let request = Conversation::new().request("hi", &Settings::default());
        assert!(request.credential.is_none());
    }

    #[test]
    fn test_clear() {
        let mut conversation = Conversation::new();
        conversation.record("a", "b");
        assert_eq!(conversation.len(), 2);
        conversation.clear();
        assert!(conversation.is_empty());
    }
}
