//! promptpush core library
//!
//! Foundational pieces shared by every promptpush crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration and hub credentials

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, HubCredentials, HubSettings, PromptSettings};
pub use error::{AppError, AppResult};
