use crate::services::drive::DriveFile;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderResponse {
    /// Always `"success"`; kept for the webhook consumer's contract.
    pub status: String,
    pub drive_link: Option<String>,
    pub folder_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListFilesRequest {
    /// Category key; older clients send it as `folderType`.
    #[serde(rename = "folderKey", alias = "folderType")]
    pub folder_key: String,
}

#[derive(Debug, Serialize)]
pub struct ListFilesResponse {
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}
