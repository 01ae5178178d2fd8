//! Google Drive REST v3 client.
//!
//! Authenticates through the hosting platform's ambient service identity:
//! an access token is fetched from the metadata endpoint per call, no
//! credential file is read and no token is cached.

use crate::config::DriveConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Drive's MIME type marker for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("{0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("auth error: {0}")]
    Auth(String),
}

/// A folder created by us; attributes are provider-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFolder {
    pub id: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

/// Child entry returned by the listing call. Optional fields are absent for
/// entries the provider does not populate them on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[async_trait]
pub trait DriveClient: Send + Sync {
    /// Create one folder under `parent_id`, returning its id and view link.
    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<DriveFolder, DriveError>;

    /// List non-trashed children of `folder_id`, sorted by name. Only the
    /// first page is returned.
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>, DriveError>;
}

#[derive(Clone)]
pub struct GoogleDriveClient {
    client: Client,
    config: DriveConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    mime_type: &'a str,
    parents: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

impl GoogleDriveClient {
    pub fn new(config: DriveConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Fetch an access token for the ambient service identity.
    async fn access_token(&self) -> Result<String, DriveError> {
        let response = self
            .client
            .get(&self.config.token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DriveError::Auth(format!("failed to parse token response: {}", e)))?;

        Ok(token.access_token)
    }

    /// Extract the raw error text from a failed provider response.
    async fn error_body(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if body.is_empty() {
            status.to_string()
        } else {
            body
        }
    }
}

#[async_trait]
impl DriveClient for GoogleDriveClient {
    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<DriveFolder, DriveError> {
        let token = self.access_token().await?;
        let url = format!("{}/files", self.config.api_base_url);
        let metadata = FileMetadata {
            name,
            mime_type: FOLDER_MIME_TYPE,
            parents: [parent_id],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("fields", "id, webViewLink")])
            .bearer_auth(&token)
            .json(&metadata)
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = Self::error_body(response).await;
            tracing::error!(%status, folder = %name, "Drive folder creation failed");
            return Err(DriveError::Api(body));
        }

        let folder: DriveFolder = response
            .json()
            .await
            .map_err(|e| DriveError::Api(format!("failed to parse response: {}", e)))?;

        tracing::info!(folder_id = %folder.id, name = %name, "Drive folder created");

        Ok(folder)
    }

    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>, DriveError> {
        let token = self.access_token().await?;
        let url = format!("{}/files", self.config.api_base_url);
        let query = format!("'{}' in parents and trashed = false", folder_id);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("orderBy", "name"),
                ("fields", "files(id, name, webViewLink, iconLink, mimeType)"),
            ])
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = Self::error_body(response).await;
            tracing::error!(%status, folder_id = %folder_id, "Drive listing failed");
            return Err(DriveError::Api(body));
        }

        let list: FileList = response
            .json()
            .await
            .map_err(|e| DriveError::Api(format!("failed to parse response: {}", e)))?;

        tracing::debug!(folder_id = %folder_id, count = list.files.len(), "Drive listing returned");

        Ok(list.files)
    }
}
