use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use shared::{Task, TaskParams};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;

// Bootstrap DDL, run on every connect. IF NOT EXISTS keeps it idempotent.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    completion_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Data-access layer for the `tasks` table, backed by a SQLite pool.
/// Clones share the same pool.
#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    /// Open (creating if missing) the database at `database_url` and make
    /// sure the `tasks` table exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url: {database_url}"))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opts).await?;
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .context("failed to create tasks table")?;
        Ok(Self { pool })
    }

    /// Drain the pool. Call once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn create(&self, params: &TaskParams) -> Result<Task> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO tasks (name, description, completion_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&params.name)
        .bind(&params.description)
        .bind(params.completion_date)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.find(result.last_insert_rowid())
            .await?
            .ok_or_else(|| anyhow::anyhow!("task not found after insert"))
    }

    pub async fn find(&self, id: i64) -> Result<Option<Task>> {
        Ok(sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        Ok(sqlx::query_as("SELECT * FROM tasks ORDER BY id")
            .fetch_all(&self.pool)
            .await?)
    }

    /// Replace the permitted fields of a task. Returns `false` when no row
    /// has this id.
    pub async fn update(&self, id: i64, params: &TaskParams) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE tasks SET name = ?, description = ?, completion_date = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&params.name)
        .bind(&params.description)
        .bind(params.completion_date)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no row had this id (deleting a missing task is
    /// not an error).
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set or clear `completion_date`, leaving name and description alone.
    pub async fn set_completion_date(
        &self,
        id: i64,
        completion_date: Option<DateTime<Utc>>,
    ) -> Result<()> {
        sqlx::query("UPDATE tasks SET completion_date = ?, updated_at = ? WHERE id = ?")
            .bind(completion_date)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}
