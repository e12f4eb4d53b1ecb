//! SQLite persistence for lists and todos.
//!
//! `Store` is the only reader and writer of the database. It wraps a single
//! connection behind a mutex; the synchronous methods are safe to call from
//! tests directly, while request handlers go through [`Store::call`] so disk
//! I/O runs on tokio's blocking pool.
//!
//! Multi-row mutations (list deletion, reordering) run in one transaction.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{List, Todo, TodosByImportance, DEFAULT_LIST_NAME};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection lock poisoned")]
    Poisoned,

    #[error("storage task join error: {0}")]
    Task(String),
}

const SCHEMA: &str = r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS lists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        todo TEXT NOT NULL,
        todo_extra TEXT,
        important INTEGER NOT NULL DEFAULT 0,
        deadline TEXT,
        position INTEGER NOT NULL DEFAULT 0,
        list_id INTEGER NOT NULL REFERENCES lists(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_todos_list_position ON todos(list_id, position);
"#;

const TODO_COLUMNS: &str = "id, todo, todo_extra, deadline, important, position, list_id";

#[derive(Clone, Debug)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `func` against this store on the blocking pool.
    pub async fn call<T, F>(&self, func: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Store) -> StoreResult<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || func(&store))
            .await
            .map_err(|error| StoreError::Task(error.to_string()))?
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Provision the "My Tasks" list when no list exists yet. Returns the
    /// list that was created, if any.
    pub fn create_default_list_if_empty(&self) -> StoreResult<Option<List>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let count: i64 = tx.query_row("SELECT COUNT(*) FROM lists", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(None);
        }
        tx.execute("INSERT INTO lists (name) VALUES (?1)", params![DEFAULT_LIST_NAME])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        info!(list_id = id, "created default list");
        Ok(Some(List {
            id,
            name: DEFAULT_LIST_NAME.to_string(),
            todo_count: 0,
        }))
    }

    pub fn list_lists(&self) -> StoreResult<Vec<List>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT l.id, l.name, COUNT(t.id)
             FROM lists l LEFT JOIN todos t ON t.list_id = l.id
             GROUP BY l.id, l.name
             ORDER BY l.id",
        )?;
        let lists = stmt
            .query_map([], list_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    pub fn create_list(&self, name: Option<String>) -> StoreResult<List> {
        let name = require_text(name, "List name is required")?;
        let conn = self.conn()?;
        conn.execute("INSERT INTO lists (name) VALUES (?1)", params![name])?;
        let id = conn.last_insert_rowid();
        debug!(list_id = id, "list created");
        fetch_list(&conn, id)
    }

    /// Replace the name only when a non-empty one is given.
    pub fn rename_list(&self, id: i64, name: Option<String>) -> StoreResult<List> {
        let conn = self.conn()?;
        fetch_list(&conn, id)?;
        if let Some(name) = name.filter(|name| !name.trim().is_empty()) {
            conn.execute("UPDATE lists SET name = ?1 WHERE id = ?2", params![name, id])?;
            debug!(list_id = id, "list renamed");
        }
        fetch_list(&conn, id)
    }

    /// Delete a list together with its todos. Returns how many todos went
    /// with it.
    pub fn delete_list(&self, id: i64) -> StoreResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        if !list_exists(&tx, id)? {
            return Err(list_not_found(id));
        }
        let todos = tx.execute("DELETE FROM todos WHERE list_id = ?1", params![id])?;
        tx.execute("DELETE FROM lists WHERE id = ?1", params![id])?;
        tx.commit()?;
        debug!(list_id = id, todos, "list deleted");
        Ok(todos)
    }

    /// Todos of one list in display order. An unknown list yields nothing.
    pub fn list_todos(&self, list_id: i64) -> StoreResult<Vec<Todo>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE list_id = ?1 ORDER BY position, id"
        ))?;
        let todos = stmt
            .query_map(params![list_id], todo_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    pub fn get_todo(&self, id: i64) -> StoreResult<Todo> {
        let conn = self.conn()?;
        fetch_todo(&conn, id)
    }

    pub fn create_todo(
        &self,
        list_id: i64,
        todo: Option<String>,
        todo_extra: Option<String>,
        important: Option<bool>,
        deadline: Option<String>,
    ) -> StoreResult<Todo> {
        let todo = require_text(todo, "Todo title is required")?;
        let conn = self.conn()?;
        if !list_exists(&conn, list_id)? {
            return Err(list_not_found(list_id));
        }
        conn.execute(
            "INSERT INTO todos (todo, todo_extra, important, deadline, position, list_id)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
            params![todo, todo_extra, important.unwrap_or(false), deadline, list_id],
        )?;
        let id = conn.last_insert_rowid();
        debug!(todo_id = id, list_id, "todo created");
        fetch_todo(&conn, id)
    }

    /// Update the title and/or deadline. An empty title is ignored;
    /// `Some(None)` clears the deadline.
    pub fn update_todo(
        &self,
        id: i64,
        todo: Option<String>,
        deadline: Option<Option<String>>,
    ) -> StoreResult<Todo> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        fetch_todo(&tx, id)?;
        if let Some(todo) = todo.filter(|todo| !todo.trim().is_empty()) {
            tx.execute("UPDATE todos SET todo = ?1 WHERE id = ?2", params![todo, id])?;
        }
        if let Some(deadline) = deadline {
            tx.execute(
                "UPDATE todos SET deadline = ?1 WHERE id = ?2",
                params![deadline, id],
            )?;
        }
        let updated = fetch_todo(&tx, id)?;
        tx.commit()?;
        debug!(todo_id = id, "todo updated");
        Ok(updated)
    }

    pub fn toggle_important(&self, id: i64) -> StoreResult<Todo> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE todos SET important = NOT important WHERE id = ?1",
            params![id],
        )?;
        if changed == 0 {
            return Err(todo_not_found(id));
        }
        fetch_todo(&conn, id)
    }

    pub fn delete_todo(&self, id: i64) -> StoreResult<()> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(todo_not_found(id));
        }
        debug!(todo_id = id, "todo deleted");
        Ok(())
    }

    /// Set each todo's position to its index in `order`. Ids that do not
    /// exist or belong to another list are skipped and returned.
    pub fn reorder_todos(&self, list_id: i64, order: &[i64]) -> StoreResult<Vec<i64>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut skipped = Vec::new();
        {
            let mut stmt =
                tx.prepare("UPDATE todos SET position = ?1 WHERE id = ?2 AND list_id = ?3")?;
            for (position, id) in order.iter().enumerate() {
                if stmt.execute(params![position as i64, id, list_id])? == 0 {
                    skipped.push(*id);
                }
            }
        }
        tx.commit()?;
        debug!(
            list_id,
            reordered = order.len() - skipped.len(),
            skipped = skipped.len(),
            "todos reordered"
        );
        Ok(skipped)
    }

    /// Every todo across all lists, split by the `important` flag.
    pub fn todos_by_importance(&self) -> StoreResult<TodosByImportance> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY list_id, position, id"
        ))?;
        let (important, not_important) = stmt
            .query_map([], todo_from_row)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .partition(|todo| todo.important);
        Ok(TodosByImportance {
            important,
            not_important,
        })
    }
}

fn require_text(value: Option<String>, message: &str) -> StoreResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(StoreError::Validation(message.to_string())),
    }
}

fn list_not_found(id: i64) -> StoreError {
    StoreError::NotFound(format!("List: {id} not found"))
}

fn todo_not_found(id: i64) -> StoreError {
    StoreError::NotFound(format!("Todo: {id} not found"))
}

fn list_exists(conn: &Connection, id: i64) -> StoreResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM lists WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn fetch_list(conn: &Connection, id: i64) -> StoreResult<List> {
    conn.query_row(
        "SELECT l.id, l.name, (SELECT COUNT(*) FROM todos t WHERE t.list_id = l.id)
         FROM lists l WHERE l.id = ?1",
        params![id],
        list_from_row,
    )
    .optional()?
    .ok_or_else(|| list_not_found(id))
}

fn fetch_todo(conn: &Connection, id: i64) -> StoreResult<Todo> {
    conn.query_row(
        &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
        params![id],
        todo_from_row,
    )
    .optional()?
    .ok_or_else(|| todo_not_found(id))
}

fn list_from_row(row: &Row<'_>) -> rusqlite::Result<List> {
    Ok(List {
        id: row.get(0)?,
        name: row.get(1)?,
        todo_count: row.get(2)?,
    })
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        todo: row.get(1)?,
        todo_extra: row.get(2)?,
        deadline: row.get(3)?,
        important: row.get(4)?,
        position: row.get(5)?,
        list_id: row.get(6)?,
    })
}
