use axum::{extract::State, response::Html};
use minijinja::context;
use tracing::instrument;

use crate::{error::AppError, state::AppState, templates};

#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    templates::render(&state.templates, "home.html", context! {})
}

#[instrument(skip(state))]
pub async fn collections(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    templates::render(&state.templates, "collections.html", context! {})
}
