//! # Domain Models
//!
//! The single entity of Rusty-Links: a submitted link.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::ranking;

/// A link submitted by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Assigned by the store on creation
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub votes: i64,
    /// Gravity-decayed score, refreshed only by an upvote
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// A fresh, never-voted submission.
    pub fn new(input: NewSubmission, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            url: input.url,
            votes: 0,
            score: 0.0,
            created_at,
        }
    }

    /// Whole hours elapsed since creation.
    pub fn age(&self, now: DateTime<Utc>) -> i64 {
        ranking::age_hours(self.created_at, now)
    }

    /// Adds one vote and recomputes the score against `now`.
    pub fn upvote(&mut self, now: DateTime<Utc>) {
        self.votes += 1;
        self.score = ranking::score(self.votes, self.age(now));
    }
}

/// Validated input for creating a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    title: String,
    url: String,
}

impl NewSubmission {
    /// Rejects a missing title or url. Whitespace-only counts as missing.
    pub fn parse(title: &str, url: &str) -> Result<Self> {
        let mut missing = Vec::new();
        if title.trim().is_empty() {
            missing.push("title");
        }
        if url.trim().is_empty() {
            missing.push("url");
        }
        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!(
                "{} can't be blank",
                missing.join(", ")
            )));
        }

        Ok(Self {
            title: title.to_string(),
            url: url.to_string(),
        })
    }
}
