use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use minijinja::context;
use tracing::{info, instrument};

use crate::{
    error::AppError,
    identity::CurrentIdentity,
    state::AppState,
    templates,
    writers::Writer,
};

use super::dto::{EntryView, NewEntryForm};
use super::repo::Entry;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/favorites", get(favorites))
        .route("/new_entry", get(new_entry_page).post(create_entry))
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Response, AppError> {
    let Some(writer) = Writer::find(&state.db, &identity.subject).await? else {
        return Ok(Redirect::to("/registration").into_response());
    };

    let entries = Entry::list_recent(&state.db, &writer.id).await?;
    let entries = into_views(entries)?;
    let logout_url = state.identity.logout_url("/");

    Ok(templates::render(
        &state.templates,
        "dashboard.html",
        context! { name => writer.name, logout_url, entries },
    )?
    .into_response())
}

#[instrument(skip(state))]
pub async fn favorites(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Response, AppError> {
    let Some(writer) = Writer::find(&state.db, &identity.subject).await? else {
        return Ok(Redirect::to("/registration").into_response());
    };

    let entries = Entry::list_favorites(&state.db, &writer.id).await?;
    let entries = into_views(entries)?;
    let logout_url = state.identity.logout_url("/");

    Ok(templates::render(
        &state.templates,
        "favorites.html",
        context! { name => writer.name, logout_url, entries },
    )?
    .into_response())
}

#[instrument(skip_all)]
pub async fn new_entry_page(
    State(state): State<AppState>,
    _identity: CurrentIdentity,
) -> Result<Response, AppError> {
    Ok(templates::render(&state.templates, "new_entry.html", context! {})?.into_response())
}

#[instrument(skip(state, form))]
pub async fn create_entry(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<NewEntryForm>,
) -> Result<Response, AppError> {
    // Validate before touching the store; a bad date creates nothing.
    let new_entry = form.parse()?;

    let Some(writer) = Writer::find(&state.db, &identity.subject).await? else {
        return Ok(Redirect::to("/registration").into_response());
    };

    let entry = Entry::create(&state.db, &writer.id, &new_entry).await?;
    info!(entry_id = %entry.id, subject = %identity.subject, date = %new_entry.date, "entry created");

    Ok(Redirect::to("/dashboard").into_response())
}

fn into_views(entries: Vec<Entry>) -> Result<Vec<EntryView>, AppError> {
    entries
        .into_iter()
        .map(|e| EntryView::try_from(e).map_err(AppError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn entry(title: &str, d: time::Date, favorite: bool) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            writer_id: "writer-1".into(),
            title: title.into(),
            date: d,
            content: "...".into(),
            favorite,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn dashboard_renders_entries_in_given_order() {
        let env = templates::environment().expect("environment builds");
        let entries = into_views(vec![
            entry("newest", date!(2024 - 03 - 15), false),
            entry("older", date!(2024 - 01 - 02), true),
        ])
        .expect("views");

        let axum::response::Html(body) = templates::render(
            &env,
            "dashboard.html",
            context! { name => "Ada", logout_url => "/oauth2/sign_out?rd=/", entries },
        )
        .expect("render dashboard");

        assert!(body.contains("Ada's journal"));
        assert!(body.contains("/oauth2/sign_out?rd=/"));
        let newest = body.find("newest").expect("newest rendered");
        let older = body.find("older").expect("older rendered");
        assert!(newest < older, "entries must keep query order");
    }

    #[test]
    fn dashboard_renders_empty_state_without_entries() {
        let env = templates::environment().expect("environment builds");
        let axum::response::Html(body) = templates::render(
            &env,
            "dashboard.html",
            context! { name => "Ada", logout_url => "/", entries => Vec::<EntryView>::new() },
        )
        .expect("render dashboard");
        assert!(body.contains("No entries yet"));
    }

    #[test]
    fn favorites_page_renders_favorite_entries() {
        let env = templates::environment().expect("environment builds");
        let entries =
            into_views(vec![entry("starred", date!(2024 - 02 - 01), true)]).expect("views");
        let axum::response::Html(body) = templates::render(
            &env,
            "favorites.html",
            context! { name => "Ada", logout_url => "/", entries },
        )
        .expect("render favorites");
        assert!(body.contains("starred"));
        assert!(body.contains("2024-02-01"));
    }
}
