use crate::{
    auth::AuthenticatedUser,
    db,
    error::AppError,
    models::{TaskInput, TaskQuery, TaskUpdate},
};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

/// Lists the caller's tasks, newest first unless `sort` is given.
///
/// ## Query Parameters:
/// - `status` (optional): `todo`, `in-progress`, `done` or `blocked`.
/// - `priority` (optional): `low`, `medium`, `high` or `critical`.
/// - `search` (optional): case-insensitive match on title or description.
/// - `overdue_only` (optional): `true` keeps unfinished tasks past their due date.
/// - `sort` (optional): `due_date` or `priority`.
pub async fn list_tasks(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = db::tasks::list_tasks(&pool, user.0, &query).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller and returns it with `201 Created`.
///
/// Missing `priority` and `status` default to `medium` and `todo`.
pub async fn create_task(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = db::tasks::create_task(&pool, task_data.into_inner(), user.0).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Fetches one task. Tasks owned by someone else are a `404`, same as missing ones.
pub async fn get_task(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = db::tasks::find_task(&pool, task_id.into_inner(), user.0)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task the caller owns; absent fields are left as they are.
pub async fn update_task(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task_id = task_id.into_inner();
    let changes = task_data.into_inner();

    // Nothing to change, leave updated_at alone
    let task = if changes.is_empty() {
        db::tasks::find_task(&pool, task_id, user.0).await?
    } else {
        db::tasks::update_task(&pool, task_id, user.0, changes).await?
    }
    .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(task))
}

pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    if !db::tasks::delete_task(&pool, task_id.into_inner(), user.0).await? {
        return Err(task_not_found());
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}
