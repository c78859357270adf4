use serde::Deserialize;
use std::path::Path;

use crate::store::DEFAULT_DATA_FILE;

pub const DEFAULT_CONFIG_FILE: &str = "config/todo.toml";
pub const DEFAULT_LISTEN_ADDR: &str = "localhost:3000";

/// Optional settings read from config/todo.toml.
/// Environment variables (TODO_DATA_PATH, TODO_LISTEN_ADDR) win over the file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TodoConfig {
    pub data_file: Option<String>,
    pub listen_addr: Option<String>,
}

impl TodoConfig {
    pub fn load() -> Self {
        let mut cfg = Self::load_from(DEFAULT_CONFIG_FILE);
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg
    }

    /// Missing or malformed files fall back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).unwrap_or_default();
        toml::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
            Self::default()
        })
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("TODO_DATA_PATH").filter(|v| !v.is_empty()) {
            self.data_file = Some(path);
        }
        if let Some(addr) = var("TODO_LISTEN_ADDR").filter(|v| !v.is_empty()) {
            self.listen_addr = Some(addr);
        }
    }

    pub fn data_file(&self) -> &str {
        self.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }

    pub fn listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }
}
