//! Synchronous API client core for the task-list service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `TaskListClient` is stateless; it holds only `base_url`.
//! - Each route is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Response envelopes (`{message, list}`, `{message, todo}`) are unwrapped
//!   by the parse methods; callers get the entity directly.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TaskListClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    CreateList, CreateTodo, List, RenameList, ReorderTodos, Todo, TodosByImportance, UpdateTodo,
};
