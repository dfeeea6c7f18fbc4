//! HTTP client for a running relay.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use pagewise_chat::{ActionRequest, ChatReply, ChatRequest, ErrorBody, HealthResponse};
use pagewise_core::{Error, Result};

use crate::conversation::Conversation;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    server_url: String,
}

impl RelayClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.server_url.clone())
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// `POST /api/chat`; returns the reply text.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let reply: ChatReply = self.post("/api/chat", request).await?;
        Ok(reply.response)
    }

    /// `POST /api/chat/action`; returns the reply text.
    pub async fn action(&self, request: &ActionRequest) -> Result<String> {
        let reply: ChatReply = self.post("/api/chat/action", request).await?;
        Ok(reply.response)
    }

    /// Send `message` within `conversation`, recording the turn on success.
    pub async fn converse(
        &self,
        conversation: &mut Conversation,
        settings: &Settings,
        message: &str,
    ) -> Result<String> {
        let reply = self.chat(&conversation.request(message, settings)).await?;
        conversation.record(message, &reply);
        Ok(reply)
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(format!("{}/health", self.server_url))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        self.decode(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.server_url, path);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        self.decode(response).await
    }

    /// Decode a success body, or turn the relay's error body into `Error::Http`.
    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.unreachable(e))?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(body) => body.message.unwrap_or(body.error),
            Err(_) => format!("Server error: {}", status.as_u16()),
        };
        Err(Error::Http {
            status: status.as_u16(),
            message,
        })
    }

    fn unreachable(&self, err: reqwest::Error) -> Error {
        Error::RelayUnreachable {
            server_url: self.server_url.clone(),
            detail: err.to_string(),
        }
    }
}
