//! # rl-db-memory
//!
//! In-process implementation of `SubmissionStore`.
//! Nothing survives a restart; meant for demos and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rl_core::error::{AppError, Result};
use rl_core::models::{NewSubmission, Submission};
use rl_core::ranking;
use rl_core::traits::{ListOrder, SubmissionStore};
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
pub struct MemorySubmissionStore {
    /// Each entry carries its insertion sequence number
    rows: DashMap<Uuid, (u64, Submission)>,
    next_seq: AtomicU64,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn create(&self, title: &str, url: &str) -> Result<Submission> {
        let input = NewSubmission::parse(title, url)?;
        let submission = Submission::new(input, Utc::now());
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);

        self.rows.insert(submission.id, (seq, submission.clone()));
        debug!(id = %submission.id, seq, "inserted submission");
        Ok(submission)
    }

    async fn find(&self, id: Uuid) -> Result<Submission> {
        self.rows
            .get(&id)
            .map(|entry| entry.value().1.clone())
            .ok_or_else(|| AppError::submission_not_found(id))
    }

    /// Natural order is insertion order; score ties keep it.
    async fn list(&self, order: ListOrder) -> Result<Vec<Submission>> {
        let mut rows: Vec<(u64, Submission)> = self
            .rows
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);

        let mut submissions: Vec<Submission> = rows.into_iter().map(|(_, s)| s).collect();
        if order == ListOrder::ScoreDesc {
            ranking::rank(&mut submissions);
        }
        Ok(submissions)
    }

    async fn update(&self, submission: &Submission, expected_votes: i64) -> Result<()> {
        let mut entry = self
            .rows
            .get_mut(&submission.id)
            .ok_or_else(|| AppError::submission_not_found(submission.id))?;

        let stored = &mut entry.value_mut().1;
        if stored.votes != expected_votes {
            return Err(AppError::Conflict(format!(
                "submission {} no longer has {expected_votes} votes",
                submission.id
            )));
        }

        stored.votes = submission.votes;
        stored.score = submission.score;
        Ok(())
    }
}
