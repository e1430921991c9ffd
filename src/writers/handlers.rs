use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use minijinja::context;
use tracing::{info, instrument, warn};

use crate::{
    error::AppError,
    identity::{CurrentIdentity, MaybeIdentity},
    state::AppState,
    templates,
};

use super::dto::RegistrationForm;
use super::repo::Writer;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login))
        .route("/registration", get(registration_page).post(register))
}

/// Entry point after the proxy hands the user back: registered writers go to
/// the dashboard, fresh identities to registration, anonymous users get the
/// sign-in prompt.
#[instrument(skip(state))]
pub async fn login(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
) -> Result<Response, AppError> {
    let Some(identity) = identity else {
        let login_url = state.identity.login_url("/registration");
        return Ok(
            templates::render(&state.templates, "login.html", context! { login_url })?
                .into_response(),
        );
    };

    match Writer::find(&state.db, &identity.subject).await? {
        Some(_) => Ok(Redirect::to("/dashboard").into_response()),
        None => Ok(Redirect::to("/registration").into_response()),
    }
}

#[instrument(skip(state))]
pub async fn registration_page(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Response, AppError> {
    if Writer::find(&state.db, &identity.subject).await?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    Ok(templates::render(&state.templates, "registration.html", context! {})?.into_response())
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    let name = form.parse()?;

    match Writer::create(&state.db, &identity.subject, &name).await {
        Ok(writer) => {
            info!(subject = %identity.subject, name = %writer.name, "writer registered");
            Ok(Redirect::to("/dashboard").into_response())
        }
        // Lost a registration race or re-submitted the form; either way the
        // subject is registered, which is where the user wanted to be.
        Err(e) if is_unique_violation(&e) => {
            warn!(subject = %identity.subject, "duplicate registration");
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
