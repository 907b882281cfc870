pub mod auth;
pub mod client;
pub mod error;
pub mod format;
pub mod types;

pub use auth::{decode_service_account, ServiceAccountKey};
pub use client::SheetsClient;
pub use error::SheetsError;
pub use types::SheetProperties;
