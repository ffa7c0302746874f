use sqlx::SqlitePool;

/// Grants `role` to the user. Returns `false` when the user already held it.
pub async fn assign_role(pool: &SqlitePool, user_id: i64, role: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role) VALUES (?, ?)")
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Roles of the user in alphabetical order.
pub async fn roles_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT role FROM user_roles WHERE user_id = ? ORDER BY role")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn has_role(pool: &SqlitePool, user_id: i64, role: &str) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM user_roles WHERE user_id = ? AND role = ?",
    )
    .bind(user_id)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}
