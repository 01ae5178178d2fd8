use crate::dtos::{ListFilesRequest, ListFilesResponse};
use crate::error::AppError;
use crate::startup::AppState;
use axum::{Json, extract::State, response::IntoResponse};

/// List the children of one of the pre-provisioned category folders. The
/// category key is resolved locally; an unknown key never reaches the
/// provider.
pub async fn list_folder_files(
    State(state): State<AppState>,
    Json(request): Json<ListFilesRequest>,
) -> Result<impl IntoResponse, AppError> {
    let folder_id = state
        .config
        .folders
        .resolve(&request.folder_key)
        .ok_or_else(|| AppError::InvalidCategory(request.folder_key.clone()))?
        .to_string();

    let files = state.drive.list_children(&folder_id).await?;

    Ok(Json(ListFilesResponse { files }))
}
