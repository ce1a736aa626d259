//! # Ranking Engine
//!
//! Gravity ranking: a submission's vote count is discounted by a power of its
//! age, so older links sink even when they hold more votes.

use chrono::{DateTime, Utc};

use crate::models::Submission;

/// Exponent applied to the age term of the score.
pub const GRAVITY: f64 = 1.8;

const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Elapsed whole hours between `created_at` and `now`.
///
/// Both instants are truncated to whole seconds first. The division floors,
/// so a `created_at` in the future yields a negative age.
pub fn age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now.timestamp() - created_at.timestamp()).div_euclid(SECONDS_PER_HOUR)
}

/// `(votes - 1) / (age + 2) ^ GRAVITY`, as real division.
///
/// The submitter's implicit first vote is discounted. Ages at or below -2
/// produce a non-finite result; callers decide what to do with those.
pub fn score(votes: i64, age: i64) -> f64 {
    (votes - 1) as f64 / ((age + 2) as f64).powf(GRAVITY)
}

/// Sorts by score, highest first. Equal scores keep their incoming order.
pub fn rank(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| b.score.total_cmp(&a.score));
}
