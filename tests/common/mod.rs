use patient_folder_service::config::{
    CommonConfig, DriveConfig, FolderCatalog, GeminiConfig, ServiceConfig,
};
use patient_folder_service::startup::Application;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PATIENTS_ROOT_ID: &str = "patients-root-id";
pub const TEST_MODEL: &str = "gemini-test";

pub struct TestApp {
    pub address: String,
    pub drive_server: MockServer,
    pub gemini_server: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let drive_server = MockServer::start().await;
        let gemini_server = MockServer::start().await;

        // Ambient-identity token endpoint, hit before every Drive call.
        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "test-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(&drive_server)
            .await;

        let config = ServiceConfig {
            common: CommonConfig { port: 0 },
            drive: DriveConfig {
                api_base_url: drive_server.uri(),
                token_url: format!("{}/token", drive_server.uri()),
                patients_root_folder_id: PATIENTS_ROOT_ID.to_string(),
            },
            gemini: GeminiConfig {
                api_base_url: gemini_server.uri(),
                api_key: "test-key".to_string(),
                model: TEST_MODEL.to_string(),
            },
            folders: FolderCatalog::new([
                ("administration", "admin-folder-id"),
                ("procedures", "procedures-folder-id"),
                ("patients-root", PATIENTS_ROOT_ID),
                ("team", "team-folder-id"),
                ("marketing", "marketing-folder-id"),
            ]),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            drive_server,
            gemini_server,
        }
    }

    /// Requests made against the Drive mock, excluding token fetches.
    pub async fn drive_api_requests(&self) -> Vec<wiremock::Request> {
        self.drive_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() != "/token")
            .collect()
    }
}
