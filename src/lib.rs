pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod todo;
pub mod web;

pub use error::{Result, TodoError};
pub use store::{JsonFileStore, MemoryStore, TodoStore};
pub use todo::{Status, ToDo};
