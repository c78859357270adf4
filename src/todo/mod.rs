use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result as TodoResult, TodoError};

/// Progress of a todo item. Serialized exactly as the strings users type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "NOT STARTED")]
    NotStarted,
    #[serde(rename = "STARTED")]
    Started,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Completed, Status::NotStarted, Status::Started];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT STARTED",
            Self::Started => "STARTED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: `Completed` is not `COMPLETED`.
impl FromStr for Status {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TodoError::InvalidStatus(s.to_string()))
    }
}

/// "COMPLETED, NOT STARTED, STARTED"
pub fn permitted_statuses() -> String {
    Status::ALL
        .iter()
        .map(Status::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single todo item as stored in todos.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDo {
    pub id: i64,
    pub description: String,
    pub status: Status,
}

impl ToDo {
    pub fn new(id: i64, description: &str, status: Status) -> Self {
        Self {
            id,
            description: description.to_string(),
            status,
        }
    }
}

impl fmt::Display for ToDo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id : {} description : {} status : {}",
            self.id, self.description, self.status
        )
    }
}

/// Highest id in the collection plus one, or 1 when empty.
pub fn next_id(todos: &[ToDo]) -> TodoResult<i64> {
    let highest = todos.iter().map(|t| t.id).max().unwrap_or(0);
    highest.checked_add(1).ok_or(TodoError::IdExhausted(highest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todos_with_ids(ids: &[i64]) -> Vec<ToDo> {
        ids.iter()
            .map(|&id| ToDo::new(id, "description here", Status::Completed))
            .collect()
    }

    #[test]
    fn test_next_id_sequential() {
        assert_eq!(next_id(&todos_with_ids(&[1, 2, 3])).unwrap(), 4);
    }

    #[test]
    fn test_next_id_unordered() {
        assert_eq!(next_id(&todos_with_ids(&[3, 17, 6])).unwrap(), 18);
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(&[]).unwrap(), 1);
    }

    #[test]
    fn test_next_id_exhausted() {
        let err = next_id(&todos_with_ids(&[4, i64::MAX])).unwrap_err();
        assert!(matches!(err, TodoError::IdExhausted(i64::MAX)));
        assert_eq!(next_id(&todos_with_ids(&[i64::MAX - 1])).unwrap(), i64::MAX);
    }

    #[test]
    fn test_status_parse() {
        let cases = [
            ("COMPLETED", Some(Status::Completed)),
            ("NOT STARTED", Some(Status::NotStarted)),
            ("STARTED", Some(Status::Started)),
            ("random junk", None),
            ("", None),
            ("Completed", None),
            ("not started", None),
            (" STARTED", None),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<Status>().ok(), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_invalid_status_error_names_permitted_values() {
        let err = "DONE".parse::<Status>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("DONE"));
        assert!(msg.contains("COMPLETED, NOT STARTED, STARTED"));
    }

    #[test]
    fn test_todo_json_shape() {
        let todo = ToDo::new(7, "write tests", Status::NotStarted);
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "id": 7, "description": "write tests", "status": "NOT STARTED" })
        );
    }

    #[test]
    fn test_todo_display() {
        let todo = ToDo::new(2, "b", Status::Started);
        assert_eq!(todo.to_string(), "id : 2 description : b status : STARTED");
    }
}
