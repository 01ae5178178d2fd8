pub mod drive;
pub mod gemini;
pub mod mock;
pub mod provisioner;

pub use drive::{DriveClient, GoogleDriveClient};
pub use gemini::{ChatProvider, GeminiChatProvider};
pub use provisioner::Provisioner;
