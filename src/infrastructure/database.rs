use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

/// Opens a SQLite pool with foreign key enforcement switched on.
///
/// # Errors
///
/// Propagates connection and `PRAGMA` failures from sqlx.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(&pool)
        .await?;

    Ok(pool)
}
