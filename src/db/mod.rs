//! Persistence layer: a sqlx SQLite pool plus one module of query functions per
//! table. Every function takes the pool (or a transaction) explicitly and returns
//! `sqlx::Error`; handlers convert to `AppError` with `?`.

pub mod roles;
pub mod tasks;
pub mod users;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Opens a pool for `database_url`, creating the database file when missing.
///
/// An in-memory database lives only as long as its connection, so for
/// `sqlite::memory:` the pool is pinned to a single connection that is never
/// recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool_options.connect_with(options).await
}

/// Applies the migrations embedded from `migrations/`.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = connect("sqlite::memory:").await.unwrap();
    migrate(&pool).await.unwrap();
    pool
}
