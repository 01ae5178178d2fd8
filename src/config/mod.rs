use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

/// Default token endpoint: the hosting platform's metadata server. The
/// service uses the ambient service identity, no credential file is read.
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

const DRIVE_API_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Deserialize, Clone)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl CommonConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub common: CommonConfig,
    pub drive: DriveConfig,
    pub gemini: GeminiConfig,
    pub folders: FolderCatalog,
}

#[derive(Debug, Clone)]
pub struct DriveConfig {
    pub api_base_url: String,
    pub token_url: String,
    /// Parent folder for every per-patient folder tree.
    pub patients_root_folder_id: String,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub model: String,
}

/// Fixed mapping from category keys to pre-provisioned Drive folder IDs.
/// Populated once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct FolderCatalog {
    map: HashMap<String, String>,
}

impl FolderCatalog {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }
}

impl ServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let patients_root = get_env("DRIVE_PATIENTS_ROOT_FOLDER_ID", None, is_prod)?;

        let folders = FolderCatalog::new([
            (
                "administration",
                get_env(
                    "FOLDER_ID_ADMINISTRATION",
                    Some("dev-folder-administration"),
                    is_prod,
                )?,
            ),
            (
                "procedures",
                get_env(
                    "FOLDER_ID_PROCEDURES",
                    Some("dev-folder-procedures"),
                    is_prod,
                )?,
            ),
            ("patients-root", patients_root.clone()),
            (
                "team",
                get_env("FOLDER_ID_TEAM", Some("dev-folder-team"), is_prod)?,
            ),
            (
                "marketing",
                get_env("FOLDER_ID_MARKETING", Some("dev-folder-marketing"), is_prod)?,
            ),
        ]);

        Ok(ServiceConfig {
            common,
            drive: DriveConfig {
                api_base_url: get_env("DRIVE_API_BASE_URL", Some(DRIVE_API_BASE_URL), is_prod)?,
                token_url: get_env("DRIVE_TOKEN_URL", Some(METADATA_TOKEN_URL), is_prod)?,
                patients_root_folder_id: patients_root,
            },
            gemini: GeminiConfig {
                api_base_url: get_env("GEMINI_API_BASE_URL", Some(GEMINI_API_BASE_URL), is_prod)?,
                api_key: get_env("GEMINI_API_KEY", None, is_prod)?,
                model: get_env("GEMINI_MODEL", Some("gemini-2.0-flash"), is_prod)?,
            },
            folders,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
