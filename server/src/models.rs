//! Wire and row shapes for lists and todos.
//!
//! Request payloads keep every client-supplied field optional so that a
//! missing `name` or `todo` surfaces as a validation failure from the store
//! (HTTP 400) rather than as a deserialization rejection.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_LIST_NAME: &str = "My Tasks";

/// A named container of todos. `todo_count` is computed on read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: i64,
    pub name: String,
    pub todo_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub todo_extra: Option<String>,
    pub deadline: Option<String>,
    pub important: bool,
    pub position: i64,
    pub list_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateList {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenameList {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub todo: Option<String>,
    #[serde(default)]
    pub todo_extra: Option<String>,
    #[serde(default)]
    pub important: Option<bool>,
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Narrow update: only the title and deadline are editable here. Importance
/// and position have their own routes.
///
/// `deadline` distinguishes an absent key (`None`, keep) from an explicit
/// `null` (`Some(None)`, clear).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub todo: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub deadline: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReorderTodos {
    #[serde(default)]
    pub order: Option<Vec<i64>>,
}

/// Todos split by the `important` flag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodosByImportance {
    pub important: Vec<Todo>,
    pub not_important: Vec<Todo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListMessage {
    pub message: String,
    pub list: List,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoMessage {
    pub message: String,
    pub todo: Todo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderMessage {
    pub message: String,
    pub skipped: Vec<i64>,
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_nullable_fields() {
        let todo = Todo {
            id: 7,
            todo: "Write spec".to_string(),
            todo_extra: None,
            deadline: None,
            important: false,
            position: 0,
            list_id: 1,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["todo"], "Write spec");
        assert!(json["todo_extra"].is_null());
        assert!(json["deadline"].is_null());
        assert_eq!(json["important"], false);
        assert_eq!(json["position"], 0);
        assert_eq!(json["list_id"], 1);
    }

    #[test]
    fn list_serializes_todo_count() {
        let list = List {
            id: 1,
            name: "Work".to_string(),
            todo_count: 3,
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Work", "todo_count": 3}));
    }

    #[test]
    fn create_list_tolerates_missing_name() {
        let input: CreateList = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_none());
    }

    #[test]
    fn create_todo_optional_fields_default_to_none() {
        let input: CreateTodo = serde_json::from_str(r#"{"todo":"Buy milk"}"#).unwrap();
        assert_eq!(input.todo.as_deref(), Some("Buy milk"));
        assert!(input.todo_extra.is_none());
        assert!(input.important.is_none());
        assert!(input.deadline.is_none());
    }

    #[test]
    fn update_todo_absent_deadline_is_none() {
        let input: UpdateTodo = serde_json::from_str(r#"{"todo":"New title"}"#).unwrap();
        assert_eq!(input.todo.as_deref(), Some("New title"));
        assert_eq!(input.deadline, None);
    }

    #[test]
    fn update_todo_null_deadline_clears() {
        let input: UpdateTodo = serde_json::from_str(r#"{"deadline":null}"#).unwrap();
        assert_eq!(input.deadline, Some(None));
    }

    #[test]
    fn update_todo_ignores_importance_and_position() {
        let input: UpdateTodo =
            serde_json::from_str(r#"{"deadline":"2026-01-01","important":true,"position":4}"#)
                .unwrap();
        assert!(input.todo.is_none());
        assert_eq!(input.deadline, Some(Some("2026-01-01".to_string())));
    }

    #[test]
    fn reorder_rejects_non_integer_ids() {
        let result: Result<ReorderTodos, _> = serde_json::from_str(r#"{"order":["a"]}"#);
        assert!(result.is_err());
    }
}
