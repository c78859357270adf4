//! Record store for todo items.
//!
//! Every operation works on the whole collection: load it, change one
//! record, write all of it back. Nothing is cached between calls.

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, DEFAULT_DATA_FILE};
pub use memory::MemoryStore;

use crate::error::{Result, TodoError};
use crate::todo::{next_id, Status, ToDo};

/// Load/mutate/save abstraction the front ends are given.
///
/// Implementors only provide whole-collection `load`/`save`; the CRUD
/// operations are shared.
pub trait TodoStore: Send {
    /// Read the whole collection, in stored order
    fn load(&self) -> Result<Vec<ToDo>>;

    /// Overwrite the whole collection
    fn save(&self, todos: &[ToDo]) -> Result<()>;

    fn list_all(&self) -> Result<Vec<ToDo>> {
        let todos = self.load()?;
        tracing::debug!("ToDo's contains {} items", todos.len());
        Ok(todos)
    }

    fn get_by_id(&self, id: i64) -> Result<ToDo> {
        self.load()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))
    }

    /// Append a new item with the next free id and persist
    fn create(&self, description: &str, status: Status) -> Result<ToDo> {
        tracing::info!(description, %status, "Starting create");
        let mut todos = self.load()?;
        let todo = ToDo::new(next_id(&todos)?, description, status);
        todos.push(todo.clone());
        self.save(&todos)?;
        tracing::info!(id = todo.id, "Create completes after saving");
        Ok(todo)
    }

    /// Overwrite description and status in place. Ids <= 0 are ignored.
    fn update(&self, id: i64, description: &str, status: Status) -> Result<()> {
        if id <= 0 {
            tracing::info!("ToDo id uninitialised - no action taken");
            return Ok(());
        }
        tracing::info!(id, description, %status, "Starting update");

        let mut todos = self.load()?;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            tracing::warn!(id, "Update not run, record id cannot be located");
            return Err(TodoError::NotFound(id));
        };
        todo.description = description.to_string();
        todo.status = status;

        self.save(&todos)?;
        tracing::info!(id, "Update completes");
        Ok(())
    }

    /// Remove exactly one item, keeping the order of the rest. Ids <= 0 are ignored.
    fn delete(&self, id: i64) -> Result<()> {
        if id <= 0 {
            tracing::info!("Id uninitialised - no action taken");
            return Ok(());
        }
        tracing::info!(id, "Starting delete");

        let mut todos = self.load()?;
        let Some(pos) = todos.iter().position(|t| t.id == id) else {
            tracing::warn!(id, "Delete not run, record id cannot be located");
            return Err(TodoError::NotFound(id));
        };
        todos.remove(pos);

        self.save(&todos)?;
        tracing::info!(id, "Delete completes");
        Ok(())
    }
}

impl<S: TodoStore + ?Sized> TodoStore for Box<S> {
    fn load(&self) -> Result<Vec<ToDo>> {
        (**self).load()
    }

    fn save(&self, todos: &[ToDo]) -> Result<()> {
        (**self).save(todos)
    }
}
