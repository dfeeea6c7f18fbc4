//! Caller side of the relay.
//!
//! Everything the browser extension keeps on its end: stored settings, the
//! prompts behind each context-menu entry, the running conversation and a
//! client for the relay's HTTP API.

pub mod conversation;
pub mod prompts;
pub mod relay;
pub mod settings;

pub use conversation::Conversation;
pub use prompts::{Language, MenuAction, LANGUAGES, MENU_ITEMS};
pub use relay::RelayClient;
pub use settings::{
    JsonFileSettingsStore, MemorySettingsStore, Settings, SettingsStore, SettingsUpdate,
};
