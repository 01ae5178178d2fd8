//! In-memory Drive client for tests.

use super::drive::{DriveClient, DriveError, DriveFile, DriveFolder};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Records every create and list call. Can be told to fail the creation of
/// one specific folder name to exercise partial-failure paths, and tracks
/// how many creates were in flight at once.
#[derive(Default)]
pub struct MockDriveClient {
    state: Mutex<MockState>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[derive(Default)]
struct MockState {
    next_id: u64,
    created: Vec<CreatedFolder>,
    fail_on: Option<String>,
    children: HashMap<String, Vec<DriveFile>>,
    list_calls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedFolder {
    pub id: String,
    pub name: String,
    pub parent_id: String,
}

impl MockDriveClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any create call for a folder with this exact name.
    pub fn fail_on(self, name: &str) -> Self {
        self.state.lock().unwrap().fail_on = Some(name.to_string());
        self
    }

    /// Pre-populate the children returned for a folder id.
    pub fn with_children(self, folder_id: &str, files: Vec<DriveFile>) -> Self {
        self.state
            .lock()
            .unwrap()
            .children
            .insert(folder_id.to_string(), files);
        self
    }

    pub fn created(&self) -> Vec<CreatedFolder> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().list_calls.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DriveClient for MockDriveClient {
    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<DriveFolder, DriveError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        // Yield so that concurrently issued creates actually overlap.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let result = {
            let mut state = self.state.lock().unwrap();
            if state.fail_on.as_deref() == Some(name) {
                Err(DriveError::Api(format!(
                    "quota exceeded while creating '{}'",
                    name
                )))
            } else {
                state.next_id += 1;
                let id = format!("folder-{}", state.next_id);
                state.created.push(CreatedFolder {
                    id: id.clone(),
                    name: name.to_string(),
                    parent_id: parent_id.to_string(),
                });
                Ok(DriveFolder {
                    web_view_link: Some(format!("https://drive.example/{}", id)),
                    id,
                })
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>, DriveError> {
        let mut state = self.state.lock().unwrap();
        state.list_calls.push(folder_id.to_string());
        Ok(state.children.get(folder_id).cloned().unwrap_or_default())
    }
}
