//! Error types for Pagewise.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing caller input. The message is shown to the user verbatim.
    #[error("{0}")]
    Validation(String),

    /// A required credential or setting is missing.
    #[error("{0}")]
    Configuration(String),

    /// The provider answered with a non-success status.
    #[error("{message}")]
    ProviderApi {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The provider answered successfully but the envelope had no reply text.
    #[error("Unexpected response format from {provider} API")]
    ProviderResponse { provider: &'static str },

    /// The provider could not be reached. `detail` is logged, never displayed.
    #[error("Could not connect to {provider} API")]
    Transport {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} API did not respond in time")]
    Timeout { provider: &'static str },

    /// The relay server itself could not be reached (caller side).
    #[error("Could not connect to relay at {server_url}")]
    RelayUnreachable { server_url: String, detail: String },

    #[error("Relay error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable name of the error category, used in logs and error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Configuration(_) => "ConfigurationError",
            Self::ProviderApi { .. } => "ProviderAPIError",
            Self::ProviderResponse { .. } => "ProviderResponseError",
            Self::Transport { .. } | Self::Timeout { .. } | Self::RelayUnreachable { .. } => {
                "TransportError"
            }
            Self::Http { .. } => "HttpError",
            Self::Io(_) => "IoError",
            Self::Json(_) => "JsonError",
        }
    }

    /// Whether the error came from talking to an upstream provider.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::ProviderApi { .. }
                | Self::ProviderResponse { .. }
                | Self::Transport { .. }
                | Self::Timeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Error::Validation("x".into()).kind(), "ValidationError");
        assert_eq!(Error::Configuration("x".into()).kind(), "ConfigurationError");
        assert_eq!(
            Error::ProviderResponse { provider: "Gemini" }.kind(),
            "ProviderResponseError"
        );
        assert_eq!(Error::Timeout { provider: "OpenAI" }.kind(), "TransportError");
    }

    #[test]
    fn test_transport_display_hides_detail() {
        let err = Error::Transport {
            provider: "OpenAI",
            detail: "tcp connect error: Connection refused (os error 111)".into(),
        };
        assert_eq!(err.to_string(), "Could not connect to OpenAI API");
        assert!(err.is_provider_failure());
    }

    #[test]
    fn test_relay_unreachable_names_the_relay() {
        let err = Error::RelayUnreachable {
            server_url: "http://localhost:3000".into(),
            detail: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "Could not connect to relay at http://localhost:3000");
        assert_eq!(err.kind(), "TransportError");
        assert!(!err.is_provider_failure());
    }

    #[test]
    fn test_provider_api_passes_message_through() {
        let err = Error::ProviderApi {
            provider: "OpenAI",
            status: 429,
            message: "You exceeded your current quota".into(),
        };
        assert_eq!(err.to_string(), "You exceeded your current quota");
        assert!(!Error::Validation("Message is required".into()).is_provider_failure());
    }
}
