use std::fs;
use std::path::{Path, PathBuf};

use super::TodoStore;
use crate::error::{Result, TodoError};
use crate::todo::ToDo;

pub const DEFAULT_DATA_FILE: &str = "./data/todos.json";

/// Store backed by a single pretty-printed JSON array (todos.json).
///
/// The file is rewritten in place on every save; there is no temp file and
/// no cross-process locking.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn display_path(&self) -> String {
        self.file_path.display().to_string()
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl TodoStore for JsonFileStore {
    fn load(&self) -> Result<Vec<ToDo>> {
        tracing::debug!(file = %self.file_path.display(), "Starting load");

        if !self.file_path.exists() {
            tracing::info!(
                file = %self.file_path.display(),
                "Data file does not exist, an empty collection will be returned"
            );
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path).map_err(|source| TodoError::Io {
            path: self.display_path(),
            source,
        })?;

        // An empty collection may have been written as `null`
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let todos: Option<Vec<ToDo>> =
            serde_json::from_str(&content).map_err(|source| TodoError::Parse {
                path: self.display_path(),
                source,
            })?;
        let todos = todos.unwrap_or_default();

        tracing::debug!("Loaded {} todos", todos.len());
        Ok(todos)
    }

    fn save(&self, todos: &[ToDo]) -> Result<()> {
        let content = serde_json::to_string_pretty(todos).map_err(|source| TodoError::Encode {
            path: self.display_path(),
            source,
        })?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| TodoError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        fs::write(&self.file_path, content).map_err(|source| TodoError::Io {
            path: self.display_path(),
            source,
        })?;
        tracing::info!(file = %self.file_path.display(), "Saved {} todos", todos.len());
        Ok(())
    }
}
