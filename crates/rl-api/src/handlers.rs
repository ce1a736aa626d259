//! # rl-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core service.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use chrono::Utc;
use rl_core::error::AppError;
use rl_core::service::LinkService;
use rl_core::traits::SubmissionStore;
use rl_ui::{IndexTemplate, NewTemplate};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: LinkService,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            service: LinkService::new(store),
        }
    }
}

/// Fields posted by the submit form. Absent fields arrive as empty strings
/// and are rejected by validation, not by the extractor.
#[derive(Debug, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Renders the front page (`/`), best score first.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let submissions = state.service.front_page().await?;
    let html = IndexTemplate::new(&submissions, Utc::now()).render()?;
    Ok(Html(html))
}

/// Adds a vote, then sends the browser back to the front page.
pub async fn upvote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ApiError> {
    state.service.upvote(id, Utc::now()).await?;
    Ok(Redirect::to("/"))
}

/// Renders the submit form (`/new`).
pub async fn new_submission() -> Result<Html<String>, ApiError> {
    Ok(Html(NewTemplate.render()?))
}

/// Creates a submission from the posted form.
///
/// Invalid input is dropped with a log line and the visitor is redirected
/// exactly as on success.
pub async fn create_submission(
    State(state): State<AppState>,
    Form(form): Form<SubmissionForm>,
) -> Result<Redirect, ApiError> {
    match state.service.submit(&form.title, &form.url).await {
        Ok(_) => {}
        Err(AppError::ValidationError(reason)) => {
            warn!(%reason, "dropping invalid submission");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(Redirect::to("/"))
}
