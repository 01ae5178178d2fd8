use crate::config::ServiceConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::drive::{DriveClient, GoogleDriveClient};
use crate::services::gemini::{ChatProvider, GeminiChatProvider};
use crate::services::provisioner::Provisioner;
use axum::{
    Router,
    routing::{get, post},
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub drive: Arc<dyn DriveClient>,
    pub chat: Arc<dyn ChatProvider>,
    pub provisioner: Provisioner,
}

impl AppState {
    pub fn new(
        config: ServiceConfig,
        drive: Arc<dyn DriveClient>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        let provisioner = Provisioner::new(
            drive.clone(),
            config.drive.patients_root_folder_id.clone(),
        );
        Self {
            config,
            drive,
            chat,
            provisioner,
        }
    }
}

/// Build the router. The endpoints are called cross-origin from a static
/// web client, so CORS is fully open.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/create-patient-folder", post(handlers::create_patient_folder))
        .route("/list-folder-files", post(handlers::list_folder_files))
        .route("/chat-relay", post(handlers::chat_relay))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: ServiceConfig) -> Result<Self, AppError> {
        let drive: Arc<dyn DriveClient> = Arc::new(GoogleDriveClient::new(config.drive.clone()));
        let chat: Arc<dyn ChatProvider> = Arc::new(GeminiChatProvider::new(config.gemini.clone()));

        tracing::info!(
            model = %config.gemini.model,
            "Initialized Gemini chat provider"
        );

        let port = config.common.port;
        let state = AppState::new(config, drive, chat);
        let app = app_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
