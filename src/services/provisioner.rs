//! Patient folder-tree provisioning.

use super::drive::{DriveClient, DriveError};
use crate::models::PatientRecord;
use futures::future::join_all;
use std::sync::Arc;

/// Fixed set of subfolders created under every patient folder.
pub const SUBFOLDERS: [&str; 6] = [
    "1. Documentos",
    "2. Contratos",
    "3. Exames",
    "4. Fotos",
    "5. Prontuário",
    "6. Logs",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedFolder {
    pub folder_id: String,
    pub web_view_link: Option<String>,
}

#[derive(Clone)]
pub struct Provisioner {
    drive: Arc<dyn DriveClient>,
    patients_root: String,
}

impl Provisioner {
    pub fn new(drive: Arc<dyn DriveClient>, patients_root: impl Into<String>) -> Self {
        Self {
            drive,
            patients_root: patients_root.into(),
        }
    }

    /// Create the patient's root folder, then the fixed subfolders.
    ///
    /// Subfolder creations are independent and issued concurrently with
    /// wait-for-all semantics: a failure does not cancel in-flight siblings,
    /// and subfolders that were created stay in place (no rollback). The
    /// returned error names every subfolder that failed.
    pub async fn provision(&self, record: &PatientRecord) -> Result<ProvisionedFolder, DriveError> {
        let folder_name = record.folder_name();
        tracing::info!(folder = %folder_name, "Creating patient folder");

        let root = self
            .drive
            .create_folder(&folder_name, &self.patients_root)
            .await?;

        let creates = SUBFOLDERS
            .iter()
            .map(|name| self.drive.create_folder(name, &root.id));
        let results = join_all(creates).await;

        let mut failed = Vec::new();
        for (name, result) in SUBFOLDERS.iter().zip(results) {
            match result {
                Ok(folder) => {
                    tracing::debug!(subfolder = %name, folder_id = %folder.id, "Subfolder created");
                }
                Err(e) => {
                    tracing::error!(subfolder = %name, error = %e, "Subfolder creation failed");
                    failed.push(format!("{}: {}", name, e));
                }
            }
        }

        if !failed.is_empty() {
            return Err(DriveError::Api(format!(
                "failed to create subfolders [{}]",
                failed.join("; ")
            )));
        }

        tracing::info!(folder_id = %root.id, "Patient folder tree provisioned");

        Ok(ProvisionedFolder {
            folder_id: root.id,
            web_view_link: root.web_view_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockDriveClient;

    fn record() -> PatientRecord {
        PatientRecord {
            first_name: "ana".to_string(),
            last_name: "silva".to_string(),
            cpf: "123.456.789-00".to_string(),
        }
    }

    #[tokio::test]
    async fn provisions_root_then_six_subfolders() {
        let drive = Arc::new(MockDriveClient::new());
        let provisioner = Provisioner::new(drive.clone(), "patients-root-id");

        let provisioned = provisioner.provision(&record()).await.unwrap();

        let created = drive.created();
        assert_eq!(created.len(), 7);

        let root = &created[0];
        assert_eq!(root.name, "Silva, Ana - 123.456.789-00");
        assert_eq!(root.parent_id, "patients-root-id");
        assert_eq!(provisioned.folder_id, root.id);

        let mut child_names: Vec<&str> = created[1..].iter().map(|c| c.name.as_str()).collect();
        child_names.sort_unstable();
        let mut expected: Vec<&str> = SUBFOLDERS.to_vec();
        expected.sort_unstable();
        assert_eq!(child_names, expected);

        for child in &created[1..] {
            assert_eq!(child.parent_id, root.id);
        }
    }

    #[tokio::test]
    async fn subfolder_creations_overlap() {
        let drive = Arc::new(MockDriveClient::new());
        let provisioner = Provisioner::new(drive.clone(), "patients-root-id");

        provisioner.provision(&record()).await.unwrap();

        // The root create runs alone; all six subfolder creates are in
        // flight together.
        assert_eq!(drive.max_in_flight(), SUBFOLDERS.len());
    }

    #[tokio::test]
    async fn one_failed_subfolder_fails_the_operation_without_rollback() {
        let drive = Arc::new(MockDriveClient::new().fail_on("3. Exames"));
        let provisioner = Provisioner::new(drive.clone(), "patients-root-id");

        let err = provisioner.provision(&record()).await.unwrap_err();
        assert!(err.to_string().contains("3. Exames"));

        // Root plus the five siblings that succeeded remain created.
        let created = drive.created();
        assert_eq!(created.len(), 6);
        assert!(created.iter().any(|c| c.name == "1. Documentos"));
        assert!(created.iter().any(|c| c.name == "2. Contratos"));
        assert!(!created.iter().any(|c| c.name == "3. Exames"));
    }

    #[tokio::test]
    async fn root_failure_creates_nothing_else() {
        let drive = Arc::new(MockDriveClient::new().fail_on("Silva, Ana - 123.456.789-00"));
        let provisioner = Provisioner::new(drive.clone(), "patients-root-id");

        provisioner.provision(&record()).await.unwrap_err();

        assert!(drive.created().is_empty());
    }
}
