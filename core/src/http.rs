//! Plain-data requests and responses exchanged with the task-list server.
//!
//! `TaskListClient` never performs I/O: it hands out an `HttpRequest` whose
//! `path` is already the absolute URL (base URL plus `/api/...` route) and
//! whose body, when present, is JSON. Whatever transport the caller uses
//! sends it and returns the status and body text as an `HttpResponse`.

/// Methods used by the task-list routes; `Patch` only for toggling importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Produced by `TaskListClient::build_*`. JSON bodies carry a
/// `content-type: application/json` header; bodiless requests carry none.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Status and body text as received. Headers are not inspected by the
/// parse methods, so a transport may leave them empty.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
