pub mod chat;
pub mod files;
pub mod health;
pub mod patients;

pub use chat::chat_relay;
pub use files::list_folder_files;
pub use health::health_check;
pub use patients::create_patient_folder;
