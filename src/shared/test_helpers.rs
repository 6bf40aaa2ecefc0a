#[cfg(test)]
use crate::core::{config::DatabaseConfig, database};

#[cfg(test)]
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

#[cfg(test)]
use std::str::FromStr;

/// In-memory SQLite pool with the `images` table in place.
///
/// A single connection that never expires keeps the in-memory database alive
/// for the whole test.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    database::ensure_schema(&pool).await.unwrap();
    pool
}

/// Database config pointing into a directory that does not exist, so every
/// connection attempt fails.
#[cfg(test)]
pub fn unreachable_database_config() -> DatabaseConfig {
    let dir = std::env::temp_dir().join(format!("missing-{}", uuid::Uuid::new_v4()));
    DatabaseConfig {
        url: format!("sqlite://{}", dir.join("images.db").display()),
        max_connections: 1,
        acquire_timeout_secs: 2,
    }
}

/// Insert a row the way an external uploader would, returning its id
#[cfg(test)]
pub async fn insert_image(pool: &SqlitePool, filename: &str) -> i64 {
    sqlx::query("INSERT INTO images (filename) VALUES (?)")
        .bind(filename)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

/// Insert a row with an explicit creation timestamp (`YYYY-MM-DD HH:MM:SS`)
#[cfg(test)]
pub async fn insert_image_at(pool: &SqlitePool, filename: &str, created_at: &str) -> i64 {
    sqlx::query("INSERT INTO images (filename, created_at) VALUES (?, ?)")
        .bind(filename)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

/// Insert a row with `rating` and `created_at` explicitly `NULL`
#[cfg(test)]
pub async fn insert_image_with_nulls(pool: &SqlitePool, filename: &str) -> i64 {
    sqlx::query("INSERT INTO images (filename, rating, created_at) VALUES (?, NULL, NULL)")
        .bind(filename)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

#[cfg(test)]
pub async fn rating_of(pool: &SqlitePool, id: i64) -> i64 {
    let (rating,): (i64,) = sqlx::query_as("SELECT rating FROM images WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap();
    rating
}
