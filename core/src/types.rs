//! Domain DTOs for the task-list API.
//!
//! These mirror the server's JSON but are defined independently so the
//! client does not depend on axum or SQLite. The integration test catches
//! schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A named container of todos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct List {
    pub id: i64,
    pub name: String,
    pub todo_count: i64,
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub todo_extra: Option<String>,
    pub deadline: Option<String>,
    pub important: bool,
    pub position: i64,
    pub list_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateList {
    pub name: String,
}

/// Rename payload; `None` leaves the name unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub todo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo_extra: Option<String>,
    #[serde(default)]
    pub important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// Request payload for editing a todo's title and deadline. Omitted fields
/// are left unchanged; `deadline: Some(None)` sends an explicit `null`,
/// which clears the deadline on the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderTodos {
    pub order: Vec<i64>,
}

/// Every todo split by the `important` flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodosByImportance {
    pub important: Vec<Todo>,
    pub not_important: Vec<Todo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListMessage {
    pub list: List,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TodoMessage {
    pub todo: Todo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReorderMessage {
    #[serde(default)]
    pub skipped: Vec<i64>,
}
