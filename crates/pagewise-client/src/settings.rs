//! Caller-side settings and their persistence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use pagewise_chat::ProviderKind;
use pagewise_core::Result;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// What the extension stores: which relay to talk to and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_provider: ProviderKind,
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_provider: ProviderKind::OpenAI,
            server_url: default_server_url(),
        }
    }
}

impl Settings {
    /// The key to send with requests, if one is set.
    pub fn credential(&self) -> Option<&str> {
        Some(self.api_key.trim()).filter(|k| !k.is_empty())
    }

    /// Apply an update, merging with existing settings.
    pub fn apply_update(&mut self, update: &SettingsUpdate) {
        if let Some(k) = &update.api_key {
            self.api_key = k.clone();
        }
        if let Some(p) = update.api_provider {
            self.api_provider = p;
        }
        if let Some(u) = &update.server_url {
            self.server_url = u.trim_end_matches('/').to_string();
        }
    }
}

/// Partial settings change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub api_provider: Option<ProviderKind>,
    pub server_url: Option<String>,
}

/// Where settings live between runs.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings persisted as pretty-printed JSON.
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileSettingsStore {
    /// A missing file yields the defaults; a corrupt one is an error.
    fn load(&self) -> Result<Settings> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Settings kept only for the life of the process.
#[derive(Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.settings.read().clone())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.write() = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_extension() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://localhost:3000");
        assert_eq!(settings.api_provider, ProviderKind::OpenAI);
        assert!(settings.credential().is_none());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("nested/settings.json"));

        let mut settings = Settings::default();
        settings.apply_update(&SettingsUpdate {
            api_key: Some("sk-abc".into()),
            api_provider: Some(ProviderKind::Gemini),
            server_url: Some("http://relay.local:8080/".into()),
        });
        store.save(&settings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.api_key, "sk-abc");
        assert_eq!(loaded.api_provider, ProviderKind::Gemini);
        assert_eq!(loaded.server_url, "http://relay.local:8080");
    }

    #[test]
    fn test_file_uses_extension_field_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"apiKey": "k", "apiProvider": "custom"}"#).unwrap();

        let loaded = JsonFileSettingsStore::new(&path).load().unwrap();
        assert_eq!(loaded.credential(), Some("k"));
        assert_eq!(loaded.api_provider, ProviderKind::Custom);
        assert_eq!(loaded.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(JsonFileSettingsStore::new(&path).load().is_err());
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySettingsStore::default();
        let mut settings = store.load().unwrap();
        settings.api_key = "  ".into();
        store.save(&settings).unwrap();
        assert!(store.load().unwrap().credential().is_none());
    }
}
