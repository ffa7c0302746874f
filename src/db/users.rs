use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{NewUser, User};

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, hashed_password, created_at, updated_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, hashed_password, created_at, updated_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Names are not unique; the earliest registered user with `name` wins.
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, hashed_password, created_at, updated_at \
         FROM users WHERE name = ? ORDER BY id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Inserts the user and grants `roles` in a single transaction.
pub async fn create_user(
    pool: &SqlitePool,
    new_user: &NewUser,
    roles: &[&str],
) -> Result<User, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, hashed_password, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, name, email, hashed_password, created_at, updated_at",
    )
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.hashed_password)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for role in roles {
        sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role) VALUES (?, ?)")
            .bind(user.id)
            .bind(*role)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(user)
}
