use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{NewNote, Note, NotePatch};
use crate::error::ApiError;
use crate::handlers::AppState;
use crate::sanitize::sanitize;
use crate::validate::validate;

/// Required create fields, in the order validation failures report them.
const REQUIRED_FIELDS: &[&str] = &["note_name", "folder_id", "note_content"];

const NOT_FOUND: &str = "Note not found";
const EMPTY_UPDATE: &str =
    "Request body must contain one of 'note_name', 'folder_id' or 'note_content'";

/// Presentation view of a note; both free-text fields run through the
/// sanitizer, id/timestamp/reference fields pass straight through.
fn serialize_note(note: &Note) -> Value {
    json!({
        "id": note.id,
        "note_name": sanitize(&note.note_name),
        "date_modified": note.date_modified,
        "folder_id": note.folder_id,
        "note_content": sanitize(&note.note_content),
    })
}

/// GET /notes - all notes, store-native order
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let notes = state.notes.select_all().await?;
    Ok(Json(notes.iter().map(serialize_note).collect()))
}

/// GET /notes/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let note = state
        .notes
        .select_by_id(id)
        .await?
        .ok_or(ApiError::not_found(NOT_FOUND))?;

    Ok(Json(serialize_note(&note)))
}

/// POST /notes - create, 201 with Location header
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let record = body
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;
    validate(record, REQUIRED_FIELDS).map_err(ApiError::missing_field)?;

    let note_name = record["note_name"]
        .as_str()
        .ok_or_else(|| ApiError::bad_request("'note_name' must be a string"))?;
    let folder_id = record["folder_id"]
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::bad_request("'folder_id' must be a valid UUID"))?;
    let note_content = record["note_content"]
        .as_str()
        .ok_or_else(|| ApiError::bad_request("'note_content' must be a string"))?;

    let note = state
        .notes
        .insert(NewNote {
            note_name: note_name.to_string(),
            folder_id,
            note_content: note_content.to_string(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/notes/{}", note.id))],
        Json(serialize_note(&note)),
    ))
}

/// PATCH /notes/:id - partial update, 204 with no body
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<NotePatch>,
) -> Result<StatusCode, ApiError> {
    if !changes.has_changes() {
        return Err(ApiError::empty_update(EMPTY_UPDATE));
    }

    let affected = state.notes.update_by_id(id, &changes).await?;
    if affected == 0 {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /notes/:id - 204 with no body
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let affected = state.notes.delete_by_id(id).await?;
    if affected == 0 {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}
