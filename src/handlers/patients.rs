use crate::dtos::CreateFolderResponse;
use crate::error::AppError;
use crate::models::PatientRecord;
use crate::startup::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::Value;

/// Webhook target for new patient/lead records. Extracts the identity
/// fields, derives the folder name, and provisions the folder tree.
pub async fn create_patient_folder(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let record = PatientRecord::from_payload(&payload)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;

    let provisioned = state.provisioner.provision(&record).await?;

    Ok(Json(CreateFolderResponse {
        status: "success".to_string(),
        drive_link: provisioned.web_view_link,
        folder_id: provisioned.folder_id,
    }))
}
