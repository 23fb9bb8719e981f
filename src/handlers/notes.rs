use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    pages,
    services::notes as note_service,
    state::AppState,
};

/// The request payload for creating or updating a note.
#[derive(Deserialize, Debug)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
}

/// Serves the most recent note, or the empty state.
pub async fn show_latest(State(state): State<AppState>) -> Result<Html<String>> {
    match note_service::latest(state.store.as_ref()).await? {
        Some(note) => {
            let previous = note_service::previous_of(state.store.as_ref(), &note.id).await?;
            Ok(Html(pages::note_page(&note, previous.as_deref(), None)))
        }
        None => Ok(Html(pages::empty_page())),
    }
}

/// Serves a single note with previous/next navigation.
pub async fn show_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let note = note_service::get(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::NotFound)?;

    let previous = note_service::previous_of(state.store.as_ref(), &id).await?;
    let next = note_service::next_of(state.store.as_ref(), &id).await?;

    Ok(Html(pages::note_page(
        &note,
        previous.as_deref(),
        next.as_deref(),
    )))
}

/// Serves the admin listing of all notes.
pub async fn admin_index(State(state): State<AppState>) -> Result<Html<String>> {
    let metas = note_service::list_all(state.store.as_ref()).await?;
    Ok(Html(pages::admin_page(&metas)))
}

/// Serves the empty note editor.
pub async fn new_note_form() -> Html<String> {
    Html(pages::editor_page(None))
}

/// Handles note creation.
#[axum::debug_handler]
pub async fn create_note(
    State(state): State<AppState>,
    Form(payload): Form<NoteForm>,
) -> Result<Response> {
    let note = note_service::create(state.store.as_ref(), &payload.title, &payload.content).await?;
    tracing::info!("✅ Note created: {}", note.id);
    Ok(Redirect::to(&format!("/notes/{}", note.id)).into_response())
}

/// Serves the editor prefilled with an existing note.
pub async fn edit_note_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let note = note_service::get(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(pages::editor_page(Some(&note))))
}

/// Handles note updates (upsert when the id has no record).
#[axum::debug_handler]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(payload): Form<NoteForm>,
) -> Result<Response> {
    let note =
        note_service::update(state.store.as_ref(), &id, &payload.title, &payload.content).await?;
    tracing::info!("✅ Note updated: {}", note.id);
    Ok(Redirect::to(&format!("/notes/{}", note.id)).into_response())
}

/// Handles note deletion.
#[axum::debug_handler]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let existed = note_service::delete(state.store.as_ref(), &id).await?;
    if existed {
        tracing::info!("✅ Note deleted: {}", id);
    } else {
        tracing::debug!("Delete on absent note: {}", id);
    }
    Ok(Redirect::to("/admin").into_response())
}
