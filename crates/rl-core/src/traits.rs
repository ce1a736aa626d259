//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Submission;

/// Ordering requested from [`SubmissionStore::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Highest score first; ties follow the store's natural order.
    ScoreDesc,
    /// Whatever order the store yields.
    #[default]
    Unordered,
}

/// Data persistence contract for submissions.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Validates and inserts a new submission with zero votes.
    async fn create(&self, title: &str, url: &str) -> Result<Submission>;

    async fn find(&self, id: Uuid) -> Result<Submission>;

    async fn list(&self, order: ListOrder) -> Result<Vec<Submission>>;

    /// Writes `votes` and `score` in a single row update, but only while the
    /// stored vote count still equals `expected_votes`. Otherwise returns
    /// `AppError::Conflict` and writes nothing.
    async fn update(&self, submission: &Submission, expected_votes: i64) -> Result<()>;
}
