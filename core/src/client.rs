//! Stateless HTTP request builder and response parser for the task-list API.
//!
//! # Design
//! `TaskListClient` holds only a `base_url`. Each route is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the HTTP round-trip.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateList, CreateTodo, List, ListMessage, Message, RenameList, ReorderMessage, ReorderTodos,
    Todo, TodoMessage, TodosByImportance, UpdateTodo,
};

#[derive(Debug, Clone)]
pub struct TaskListClient {
    base_url: String,
}

impl TaskListClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // --- lists ---

    pub fn build_list_lists(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/lists")
    }

    pub fn build_create_list(&self, input: &CreateList) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/api/lists", input)
    }

    pub fn build_rename_list(&self, id: i64, input: &RenameList) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/api/lists/{id}"), input)
    }

    pub fn build_delete_list(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/api/lists/{id}"))
    }

    pub fn build_list_todos(&self, list_id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/api/lists/{list_id}/todos"))
    }

    pub fn build_create_todo(
        &self,
        list_id: i64,
        input: &CreateTodo,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, &format!("/api/lists/{list_id}/todos"), input)
    }

    pub fn build_reorder_todos(
        &self,
        list_id: i64,
        order: &[i64],
    ) -> Result<HttpRequest, ApiError> {
        let input = ReorderTodos {
            order: order.to_vec(),
        };
        self.json_request(
            HttpMethod::Post,
            &format!("/api/lists/{list_id}/todos/reorder"),
            &input,
        )
    }

    // --- todos ---

    pub fn build_todos_by_importance(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/todos")
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/api/todos/{id}"))
    }

    pub fn build_update_todo(&self, id: i64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/api/todos/{id}"), input)
    }

    pub fn build_toggle_important(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Patch, &format!("/api/todos/{id}/toggle"))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/api/todos/{id}"))
    }

    // --- parsing ---

    pub fn parse_list_lists(&self, response: HttpResponse) -> Result<Vec<List>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_list(&self, response: HttpResponse) -> Result<List, ApiError> {
        parse_json::<ListMessage>(response, 201).map(|envelope| envelope.list)
    }

    pub fn parse_rename_list(&self, response: HttpResponse) -> Result<List, ApiError> {
        parse_json::<ListMessage>(response, 200).map(|envelope| envelope.list)
    }

    /// Returns the server's confirmation message.
    pub fn parse_delete_list(&self, response: HttpResponse) -> Result<String, ApiError> {
        parse_json::<Message>(response, 200).map(|envelope| envelope.message)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json::<TodoMessage>(response, 201).map(|envelope| envelope.todo)
    }

    /// Returns the ids the server skipped because they were unknown or
    /// belonged to another list.
    pub fn parse_reorder_todos(&self, response: HttpResponse) -> Result<Vec<i64>, ApiError> {
        parse_json::<ReorderMessage>(response, 200).map(|envelope| envelope.skipped)
    }

    pub fn parse_todos_by_importance(
        &self,
        response: HttpResponse,
    ) -> Result<TodosByImportance, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json::<TodoMessage>(response, 200).map(|envelope| envelope.todo)
    }

    pub fn parse_toggle_important(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json::<TodoMessage>(response, 200).map(|envelope| envelope.todo)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<String, ApiError> {
        parse_json::<Message>(response, 200).map(|envelope| envelope.message)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
            ..self.request(method, path)
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = || {
        serde_json::from_str::<Message>(&response.body)
            .map(|envelope| envelope.message)
            .unwrap_or_else(|_| response.body.clone())
    };
    match response.status {
        404 => Err(ApiError::NotFound(message())),
        400 => Err(ApiError::Validation(message())),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TaskListClient {
        TaskListClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    const TODO_JSON: &str = r#"{"id":4,"todo":"Write spec","todo_extra":null,"deadline":null,"important":false,"position":0,"list_id":1}"#;

    #[test]
    fn build_list_lists_produces_correct_request() {
        let req = client().build_list_lists();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/lists");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_list_produces_correct_request() {
        let input = CreateList {
            name: "Work".to_string(),
        };
        let req = client().build_create_list(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/lists");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Work"}));
    }

    #[test]
    fn build_rename_list_omits_missing_name() {
        let req = client().build_rename_list(3, &RenameList::default()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/lists/3");
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn build_delete_list_produces_correct_request() {
        let req = client().build_delete_list(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/lists/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_targets_list() {
        let input = CreateTodo {
            todo: "Buy milk".to_string(),
            todo_extra: None,
            important: true,
            deadline: Some("friday".to_string()),
        };
        let req = client().build_create_todo(2, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/lists/2/todos");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["todo"], "Buy milk");
        assert_eq!(body["important"], true);
        assert_eq!(body["deadline"], "friday");
        assert!(body.get("todo_extra").is_none());
    }

    #[test]
    fn build_reorder_todos_sends_order() {
        let req = client().build_reorder_todos(2, &[9, 7, 8]).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/lists/2/todos/reorder");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"order": [9, 7, 8]}));
    }

    #[test]
    fn build_update_todo_encodes_deadline_states() {
        let keep = UpdateTodo {
            todo: Some("Updated".to_string()),
            deadline: None,
        };
        let req = client().build_update_todo(5, &keep).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/todos/5");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"todo": "Updated"}));

        let clear = UpdateTodo {
            todo: None,
            deadline: Some(None),
        };
        let req = client().build_update_todo(5, &clear).unwrap();
        assert_eq!(req.body.as_deref(), Some(r#"{"deadline":null}"#));
    }

    #[test]
    fn build_toggle_important_uses_patch() {
        let req = client().build_toggle_important(5);
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:3000/api/todos/5/toggle");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_lists_success() {
        let resp = response(200, r#"[{"id":1,"name":"My Tasks","todo_count":2}]"#);
        let lists = client().parse_list_lists(resp).unwrap();
        assert_eq!(
            lists,
            vec![List {
                id: 1,
                name: "My Tasks".to_string(),
                todo_count: 2
            }]
        );
    }

    #[test]
    fn parse_create_list_unwraps_envelope() {
        let resp = response(
            201,
            r#"{"message":"List: 2 created","list":{"id":2,"name":"Work","todo_count":0}}"#,
        );
        let list = client().parse_create_list(resp).unwrap();
        assert_eq!(list.id, 2);
        assert_eq!(list.name, "Work");
    }

    #[test]
    fn parse_create_list_validation_error() {
        let resp = response(400, r#"{"message":"List name is required"}"#);
        let err = client().parse_create_list(resp).unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg == "List name is required"));
    }

    #[test]
    fn parse_create_todo_success() {
        let body = format!(r#"{{"message":"Todo: 4 created","todo":{TODO_JSON}}}"#);
        let todo = client().parse_create_todo(response(201, &body)).unwrap();
        assert_eq!(todo.id, 4);
        assert_eq!(todo.todo, "Write spec");
        assert!(!todo.important);
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_get_todo_not_found_keeps_message() {
        let resp = response(404, r#"{"message":"Todo: 4 not found"}"#);
        let err = client().parse_get_todo(resp).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(msg) if msg.contains('4')));
    }

    #[test]
    fn parse_reorder_returns_skipped_ids() {
        let resp = response(200, r#"{"message":"List: 1 todos reordered","skipped":[12]}"#);
        assert_eq!(client().parse_reorder_todos(resp).unwrap(), vec![12]);
    }

    #[test]
    fn parse_todos_by_importance_success() {
        let body = format!(r#"{{"important":[],"not_important":[{TODO_JSON}]}}"#);
        let split = client()
            .parse_todos_by_importance(response(200, &body))
            .unwrap();
        assert!(split.important.is_empty());
        assert_eq!(split.not_important[0].id, 4);
    }

    #[test]
    fn parse_delete_todo_returns_message() {
        let resp = response(200, r#"{"message":"Todo: 4 deleted"}"#);
        assert_eq!(client().parse_delete_todo(resp).unwrap(), "Todo: 4 deleted");
    }

    #[test]
    fn parse_delete_list_not_found_plain_body() {
        let err = client().parse_delete_list(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(msg) if msg.is_empty()));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TaskListClient::new("http://localhost:3000/");
        let req = client.build_list_lists();
        assert_eq!(req.path, "http://localhost:3000/api/lists");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client()
            .parse_list_todos(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
