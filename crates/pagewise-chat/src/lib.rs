//! Provider-routing chat relay (OpenAI/Gemini/custom OpenAI-compatible).
//!
//! Translates canonical chat history into each provider's wire format,
//! performs a single upstream call and flattens failures into one report shape.

pub mod config;
pub mod dispatcher;
pub mod providers;
pub mod types;

pub use config::ProviderConfig;
pub use dispatcher::Dispatcher;
pub use types::*;
