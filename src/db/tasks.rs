use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::{Task, TaskInput, TaskQuery, TaskSort, TaskStatus, TaskUpdate};

pub async fn create_task(pool: &SqlitePool, input: TaskInput, user_id: i64) -> Result<Task, sqlx::Error> {
    let now = Utc::now();
    let search = search_text(&input.title, input.description.as_deref());

    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (title, description, priority, status, due_date, search_text, user_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id, title, description, priority, status, due_date, user_id, created_at, updated_at",
    )
    .bind(input.title)
    .bind(input.description)
    .bind(input.priority.unwrap_or_default())
    .bind(input.status.unwrap_or_default())
    .bind(input.due_date)
    .bind(search)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Looks up a task owned by `user_id`. Tasks of other users are reported as absent.
pub async fn find_task(pool: &SqlitePool, id: i64, user_id: i64) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT id, title, description, priority, status, due_date, user_id, created_at, updated_at
         FROM tasks WHERE id = ? AND user_id = ?",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Tasks owned by `user_id`, narrowed by the optional filters. Newest first
/// unless `query.sort` asks otherwise.
pub async fn list_tasks(pool: &SqlitePool, user_id: i64, query: &TaskQuery) -> Result<Vec<Task>, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT id, title, description, priority, status, due_date, user_id, created_at, updated_at \
         FROM tasks WHERE user_id = ",
    );
    builder.push_bind(user_id);

    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(priority) = query.priority {
        builder.push(" AND priority = ").push_bind(priority);
    }
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        // SQLite's own case folding is ASCII-only, so both sides are lowered here
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        builder
            .push(" AND search_text LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
    if query.overdue_only {
        builder
            .push(" AND due_date IS NOT NULL AND due_date < ")
            .push_bind(Utc::now())
            .push(" AND status != ")
            .push_bind(TaskStatus::Done);
    }

    builder.push(match query.sort {
        None => " ORDER BY id DESC",
        Some(TaskSort::DueDate) => " ORDER BY due_date IS NULL, due_date, id DESC",
        Some(TaskSort::Priority) => {
            " ORDER BY CASE priority \
               WHEN 'critical' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 ELSE 3 END, \
             id DESC"
        }
    });

    builder.build_query_as::<Task>().fetch_all(pool).await
}

/// Applies the fields present in `update` and bumps `updated_at`. Returns `None`
/// when no task with `id` belongs to `user_id`.
pub async fn update_task(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    update: TaskUpdate,
) -> Result<Option<Task>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = COALESCE(?, title),
             description = COALESCE(?, description),
             priority = COALESCE(?, priority),
             status = COALESCE(?, status),
             due_date = COALESCE(?, due_date),
             updated_at = ?
         WHERE id = ? AND user_id = ?
         RETURNING id, title, description, priority, status, due_date, user_id, created_at, updated_at",
    )
    .bind(update.title)
    .bind(update.description)
    .bind(update.priority)
    .bind(update.status)
    .bind(update.due_date)
    .bind(Utc::now())
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(task) = &task {
        sqlx::query("UPDATE tasks SET search_text = ? WHERE id = ?")
            .bind(search_text(&task.title, task.description.as_deref()))
            .bind(task.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(task)
}

/// Returns `false` when nothing was deleted.
pub async fn delete_task(pool: &SqlitePool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn search_text(title: &str, description: Option<&str>) -> String {
    format!(
        "{}\n{}",
        title.to_lowercase(),
        description.unwrap_or_default().to_lowercase()
    )
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
