//! SQLite storage backend
//!
//! Keeps user records in a single `users` table. The pool is capped at one
//! connection, so the store holds exactly one database handle for its lifetime.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::UserStorage;
use crate::error::Result;
use crate::user::UserRecord;

/// SQLite storage backend
pub struct SqliteUserStorage {
    pool: SqlitePool,
    /// Database file, `None` for in-memory or caller-supplied pools
    path: Option<PathBuf>,
}

impl SqliteUserStorage {
    /// Open (or create) the database file at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = Self::pool_options().connect_with(options).await?;

        debug!("Opened user database at {:?}", path);

        Ok(Self {
            pool,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database (contents vanish when the store is dropped)
    pub async fn in_memory() -> Result<Self> {
        let pool = Self::pool_options().connect("sqlite::memory:").await?;

        Ok(Self { pool, path: None })
    }

    /// Use an existing pool.
    ///
    /// The caller is responsible for sizing it; an in-memory pool must not
    /// hand out more than one connection or each one sees its own database.
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool, path: None }
    }

    /// One connection, never recycled
    fn pool_options() -> SqlitePoolOptions {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    }

    /// Get the database file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[async_trait]
impl UserStorage for SqliteUserStorage {
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        debug!("Users table ready");
        Ok(())
    }

    async fn insert_user(&self, record: &UserRecord) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO users (username, password) VALUES (?, ?)
             ON CONFLICT(username) DO NOTHING",
        )
        .bind(&record.username)
        .bind(record.password.expose())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn credentials_match(&self, username: &str, password: &str) -> Result<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM users WHERE username = ? AND password = ?")
                .bind(username)
                .bind(password)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.is_some())
    }

    async fn contains(&self, username: &str) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("Closed user database");
    }

    fn backend_name(&self) -> &'static str {
        "SQLite"
    }
}
