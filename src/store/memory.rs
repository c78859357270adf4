use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::TodoStore;
use crate::error::Result;
use crate::todo::ToDo;

/// Volatile store used by tests and by callers that don't want a file.
#[derive(Default)]
pub struct MemoryStore {
    todos: Mutex<Vec<ToDo>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<ToDo>) -> Self {
        Self {
            todos: Mutex::new(todos),
            saves: AtomicUsize::new(0),
        }
    }

    /// How many times the collection has been written back
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl TodoStore for MemoryStore {
    fn load(&self) -> Result<Vec<ToDo>> {
        let todos = self.todos.lock().unwrap_or_else(|e| e.into_inner());
        Ok(todos.clone())
    }

    fn save(&self, todos: &[ToDo]) -> Result<()> {
        let mut stored = self.todos.lock().unwrap_or_else(|e| e.into_inner());
        *stored = todos.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
