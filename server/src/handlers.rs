use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::error::ApiError;
use crate::models::{
    CreateList, CreateTodo, List, ListMessage, Message, RenameList, ReorderMessage, ReorderTodos,
    Todo, TodoMessage, TodosByImportance, UpdateTodo,
};
use crate::store::Store;

type IdPath = Result<Path<i64>, PathRejection>;
type Body<T> = Result<Json<T>, JsonRejection>;
type ApiResult<T> = Result<T, ApiError>;

pub async fn health() -> Json<Message> {
    Json(Message {
        message: "ok".to_string(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Resource not found")
}

// --- lists ---

pub async fn list_lists(State(store): State<Store>) -> ApiResult<Json<Vec<List>>> {
    let lists = store.call(|store| store.list_lists()).await?;
    Ok(Json(lists))
}

pub async fn create_list(
    State(store): State<Store>,
    body: Body<CreateList>,
) -> ApiResult<(StatusCode, Json<ListMessage>)> {
    let Json(input) = body?;
    let list = store.call(move |store| store.create_list(input.name)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ListMessage {
            message: format!("List: {} created", list.id),
            list,
        }),
    ))
}

pub async fn rename_list(
    State(store): State<Store>,
    id: IdPath,
    body: Body<RenameList>,
) -> ApiResult<Json<ListMessage>> {
    let Path(id) = id?;
    let Json(input) = body?;
    let list = store.call(move |store| store.rename_list(id, input.name)).await?;
    Ok(Json(ListMessage {
        message: format!("List: {id} renamed"),
        list,
    }))
}

pub async fn delete_list(State(store): State<Store>, id: IdPath) -> ApiResult<Json<Message>> {
    let Path(id) = id?;
    let removed = store.call(move |store| store.delete_list(id)).await?;
    Ok(Json(Message {
        message: format!("List: {id} deleted with {removed} todos"),
    }))
}

// --- todos within a list ---

pub async fn list_todos(State(store): State<Store>, id: IdPath) -> ApiResult<Json<Vec<Todo>>> {
    let Path(list_id) = id?;
    let todos = store.call(move |store| store.list_todos(list_id)).await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(store): State<Store>,
    id: IdPath,
    body: Body<CreateTodo>,
) -> ApiResult<(StatusCode, Json<TodoMessage>)> {
    let Path(list_id) = id?;
    let Json(input) = body?;
    let todo = store
        .call(move |store| {
            store.create_todo(
                list_id,
                input.todo,
                input.todo_extra,
                input.important,
                input.deadline,
            )
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(TodoMessage {
            message: format!("Todo: {} created", todo.id),
            todo,
        }),
    ))
}

pub async fn reorder_todos(
    State(store): State<Store>,
    id: IdPath,
    body: Body<ReorderTodos>,
) -> ApiResult<Json<ReorderMessage>> {
    let Path(list_id) = id?;
    let Json(input) = body?;
    let order = input.order.ok_or_else(|| {
        ApiError::new(StatusCode::BAD_REQUEST, "Reorder requires an order array")
    })?;
    let skipped = store
        .call(move |store| store.reorder_todos(list_id, &order))
        .await?;
    Ok(Json(ReorderMessage {
        message: format!("List: {list_id} todos reordered"),
        skipped,
    }))
}

// --- single todos ---

pub async fn todos_by_importance(
    State(store): State<Store>,
) -> ApiResult<Json<TodosByImportance>> {
    let split = store.call(|store| store.todos_by_importance()).await?;
    Ok(Json(split))
}

pub async fn get_todo(State(store): State<Store>, id: IdPath) -> ApiResult<Json<Todo>> {
    let Path(id) = id?;
    let todo = store.call(move |store| store.get_todo(id)).await?;
    Ok(Json(todo))
}

pub async fn update_todo(
    State(store): State<Store>,
    id: IdPath,
    body: Body<UpdateTodo>,
) -> ApiResult<Json<TodoMessage>> {
    let Path(id) = id?;
    let Json(input) = body?;
    let todo = store
        .call(move |store| store.update_todo(id, input.todo, input.deadline))
        .await?;
    Ok(Json(TodoMessage {
        message: format!("Todo: {id} updated"),
        todo,
    }))
}

pub async fn toggle_important(
    State(store): State<Store>,
    id: IdPath,
) -> ApiResult<Json<TodoMessage>> {
    let Path(id) = id?;
    let todo = store.call(move |store| store.toggle_important(id)).await?;
    Ok(Json(TodoMessage {
        message: format!("Todo: {id} importance toggled"),
        todo,
    }))
}

pub async fn delete_todo(State(store): State<Store>, id: IdPath) -> ApiResult<Json<Message>> {
    let Path(id) = id?;
    store.call(move |store| store.delete_todo(id)).await?;
    Ok(Json(Message {
        message: format!("Todo: {id} deleted"),
    }))
}
