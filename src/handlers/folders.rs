use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{Folder, FolderPatch, NewFolder};
use crate::error::ApiError;
use crate::handlers::AppState;
use crate::sanitize::sanitize;
use crate::validate::validate;

/// Required create fields, in the order validation failures report them.
const REQUIRED_FIELDS: &[&str] = &["folder_name"];

const NOT_FOUND: &str = "Folder not found";
const EMPTY_UPDATE: &str = "Request body must contain 'folder_name'";

/// Presentation view of a folder; free text runs through the sanitizer on
/// every outbound path, the stored value stays raw.
fn serialize_folder(folder: &Folder) -> Value {
    json!({
        "id": folder.id,
        "folder_name": sanitize(&folder.folder_name),
    })
}

/// GET /folders - all folders, store-native order
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let folders = state.folders.select_all().await?;
    Ok(Json(folders.iter().map(serialize_folder).collect()))
}

/// GET /folders/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let folder = state
        .folders
        .select_by_id(id)
        .await?
        .ok_or(ApiError::not_found(NOT_FOUND))?;

    Ok(Json(serialize_folder(&folder)))
}

/// POST /folders - create, 201 with Location header
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let record = body
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;
    validate(record, REQUIRED_FIELDS).map_err(ApiError::missing_field)?;

    let folder_name = record["folder_name"]
        .as_str()
        .ok_or_else(|| ApiError::bad_request("'folder_name' must be a string"))?;
    if folder_name.is_empty() {
        return Err(ApiError::bad_request("'folder_name' must not be empty"));
    }

    let folder = state
        .folders
        .insert(NewFolder {
            folder_name: folder_name.to_string(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/folders/{}", folder.id))],
        Json(serialize_folder(&folder)),
    ))
}

/// PATCH /folders/:id - partial update, 204 with no body
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<FolderPatch>,
) -> Result<StatusCode, ApiError> {
    if !changes.has_changes() {
        return Err(ApiError::empty_update(EMPTY_UPDATE));
    }

    let affected = state.folders.update_by_id(id, &changes).await?;
    if affected == 0 {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /folders/:id - 204 with no body
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let affected = state.folders.delete_by_id(id).await?;
    if affected == 0 {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}
