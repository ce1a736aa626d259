//! # LinkService
//!
//! Coordinates the store and the ranking engine for the three things a
//! visitor can do: submit, look at the front page, and upvote.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Submission;
use crate::traits::{ListOrder, SubmissionStore};

/// How many times an upvote re-reads the row after losing a race.
pub const MAX_UPVOTE_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct LinkService {
    store: Arc<dyn SubmissionStore>,
}

impl LinkService {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    pub async fn submit(&self, title: &str, url: &str) -> Result<Submission> {
        let submission = self.store.create(title, url).await?;
        info!(id = %submission.id, url = %submission.url, "submission created");
        Ok(submission)
    }

    /// All submissions, best score first.
    pub async fn front_page(&self) -> Result<Vec<Submission>> {
        self.store.list(ListOrder::ScoreDesc).await
    }

    /// Adds one vote to `id` and persists the recomputed score.
    ///
    /// The write is a compare-and-set on the vote count; a concurrent upvote
    /// that lands first makes this one re-read and try again.
    pub async fn upvote(&self, id: Uuid, now: DateTime<Utc>) -> Result<Submission> {
        for attempt in 1..=MAX_UPVOTE_ATTEMPTS {
            let mut submission = self.store.find(id).await?;
            let expected_votes = submission.votes;
            submission.upvote(now);

            if !submission.score.is_finite() {
                warn!(
                    %id,
                    created_at = %submission.created_at,
                    "refusing upvote on submission dated in the future"
                );
                return Err(AppError::ValidationError(format!(
                    "submission {id} has a creation time in the future"
                )));
            }

            match self.store.update(&submission, expected_votes).await {
                Ok(()) => {
                    debug!(%id, votes = submission.votes, score = submission.score, "upvoted");
                    return Ok(submission);
                }
                Err(AppError::Conflict(reason)) => {
                    debug!(%id, attempt, %reason, "upvote lost a race, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(%id, "upvote gave up after {MAX_UPVOTE_ATTEMPTS} attempts");
        Err(AppError::Conflict(format!(
            "submission {id} kept changing during upvote"
        )))
    }
}
