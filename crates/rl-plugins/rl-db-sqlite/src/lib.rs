//! # rl-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `rl-core` domain models.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use rl_core::error::{AppError, Result};
use rl_core::models::{NewSubmission, Submission};
use rl_core::traits::{ListOrder, SubmissionStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, error, info};
use uuid::Uuid;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub struct SqliteSubmissionStore {
    pool: SqlitePool,
}

impl SqliteSubmissionStore {
    /// Opens (creating if needed) the database at `url` and applies migrations.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        Self::connect(url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Like [`SqliteSubmissionStore::new`] with an explicit pool size.
    ///
    /// An in-memory database lives and dies with its connection, so those
    /// URLs get exactly one connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(url, "sqlite submission store ready");

        Ok(Self { pool })
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn internal(e: sqlx::Error) -> AppError {
    error!(error = %e, "sqlite operation failed");
    AppError::Internal(e.to_string())
}

fn submission_from_row(row: &SqliteRow) -> std::result::Result<Submission, sqlx::Error> {
    Ok(Submission {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        url: row.try_get("url")?,
        votes: row.try_get("votes")?,
        score: row.try_get("score")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl SubmissionStore for SqliteSubmissionStore {
    async fn create(&self, title: &str, url: &str) -> Result<Submission> {
        let input = NewSubmission::parse(title, url)?;
        let submission = Submission::new(input, Utc::now());

        sqlx::query(
            "INSERT INTO submissions (id, title, url, votes, score, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(submission.id)
        .bind(&submission.title)
        .bind(&submission.url)
        .bind(submission.votes)
        .bind(submission.score)
        .bind(submission.created_at)
        .bind(submission.created_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        debug!(id = %submission.id, "inserted submission");
        Ok(submission)
    }

    async fn find(&self, id: Uuid) -> Result<Submission> {
        let row = sqlx::query(
            "SELECT id, title, url, votes, score, created_at FROM submissions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        match row {
            Some(row) => submission_from_row(&row).map_err(internal),
            None => Err(AppError::submission_not_found(id)),
        }
    }

    /// Ties on score come back in insertion order.
    async fn list(&self, order: ListOrder) -> Result<Vec<Submission>> {
        let sql = match order {
            ListOrder::ScoreDesc => {
                "SELECT id, title, url, votes, score, created_at FROM submissions \
                 ORDER BY score DESC, rowid ASC"
            }
            ListOrder::Unordered => {
                "SELECT id, title, url, votes, score, created_at FROM submissions"
            }
        };

        sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(internal)?
            .iter()
            .map(submission_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(internal)
    }

    /// Compare-and-set on `votes`, so two racing upvotes cannot both land on
    /// the same starting count.
    async fn update(&self, submission: &Submission, expected_votes: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE submissions SET votes = ?, score = ?, updated_at = ? \
             WHERE id = ? AND votes = ?",
        )
        .bind(submission.votes)
        .bind(submission.score)
        .bind(Utc::now())
        .bind(submission.id)
        .bind(expected_votes)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let exists = sqlx::query("SELECT 1 FROM submissions WHERE id = ?")
            .bind(submission.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?
            .is_some();

        if exists {
            Err(AppError::Conflict(format!(
                "submission {} no longer has {expected_votes} votes",
                submission.id
            )))
        } else {
            Err(AppError::submission_not_found(submission.id))
        }
    }
}
