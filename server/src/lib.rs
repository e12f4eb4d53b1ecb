//! HTTP task-list service: named lists of ordered todos backed by SQLite.
//!
//! [`app`] builds the router around an explicit [`Store`]; [`run`] serves it
//! on a listener until the shutdown future resolves.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;

use std::future::Future;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;

pub use config::Config;
pub use models::{List, Todo, TodosByImportance};
pub use store::{Store, StoreError};

pub fn app(store: Store) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/lists",
            get(handlers::list_lists).post(handlers::create_list),
        )
        .route(
            "/api/lists/{id}",
            put(handlers::rename_list).delete(handlers::delete_list),
        )
        .route(
            "/api/lists/{id}/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route("/api/lists/{id}/todos/reorder", post(handlers::reorder_todos))
        .route("/api/todos", get(handlers::todos_by_importance))
        .route(
            "/api/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/api/todos/{id}/toggle", patch(handlers::toggle_important))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn(middleware::trace_requests))
        .with_state(store)
}

pub async fn run<F>(
    listener: TcpListener,
    store: Store,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
