use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use shared::{Task, TaskParams};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::store::TaskStore;

/// Build the full route table. A lookup miss is never an error status:
/// show/edit/update redirect to the root, destroy/complete redirect to the
/// task list.
pub fn app(store: TaskStore) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/tasks", get(index).post(create))
        .route("/tasks/new", get(new))
        .route("/tasks/:id", get(show).patch(update).delete(destroy))
        .route("/tasks/:id/edit", get(edit))
        .route("/tasks/:id/complete", patch(complete))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

async fn index(State(store): State<TaskStore>) -> Result<Json<Vec<Task>>, StatusCode> {
    let tasks = store.list().await.map_err(internal_error)?;
    Ok(Json(tasks))
}

async fn show(
    State(store): State<TaskStore>,
    Path(id): Path<i64>,
) -> Result<Response, StatusCode> {
    match store.find(id).await.map_err(internal_error)? {
        Some(task) => Ok(Json(task).into_response()),
        None => Ok(Redirect::to("/").into_response()),
    }
}

/// The empty creation form context.
async fn new() -> Json<TaskParams> {
    Json(TaskParams::default())
}

async fn create(
    State(store): State<TaskStore>,
    Json(params): Json<TaskParams>,
) -> Result<Redirect, StatusCode> {
    let task = store.create(&params).await.map_err(internal_error)?;
    Ok(Redirect::to(&format!("/tasks/{}", task.id)))
}

/// Form context for an existing task.
async fn edit(
    State(store): State<TaskStore>,
    Path(id): Path<i64>,
) -> Result<Response, StatusCode> {
    match store.find(id).await.map_err(internal_error)? {
        Some(task) => Ok(Json(task).into_response()),
        None => Ok(Redirect::to("/").into_response()),
    }
}

async fn update(
    State(store): State<TaskStore>,
    Path(id): Path<i64>,
    Json(params): Json<TaskParams>,
) -> Result<Redirect, StatusCode> {
    if store.update(id, &params).await.map_err(internal_error)? {
        Ok(Redirect::to(&format!("/tasks/{id}")))
    } else {
        Ok(Redirect::to("/"))
    }
}

async fn destroy(
    State(store): State<TaskStore>,
    Path(id): Path<i64>,
) -> Result<Redirect, StatusCode> {
    store.delete(id).await.map_err(internal_error)?;
    Ok(Redirect::to("/tasks"))
}

/// Toggle between complete and incomplete by setting or clearing the
/// completion date. Name and description are untouched.
async fn complete(
    State(store): State<TaskStore>,
    Path(id): Path<i64>,
) -> Result<Redirect, StatusCode> {
    if let Some(task) = store.find(id).await.map_err(internal_error)? {
        let toggled = match task.completion_date {
            None => Some(Utc::now()),
            Some(_) => None,
        };
        store
            .set_completion_date(task.id, toggled)
            .await
            .map_err(internal_error)?;
    }
    Ok(Redirect::to("/tasks"))
}

fn internal_error(err: anyhow::Error) -> StatusCode {
    error!(err = %err, "database operation failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
