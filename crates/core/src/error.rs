//! Error types for promptpush.
//!
//! One enum covers every failure category the tool can hit: configuration,
//! I/O, prompt loading and hub communication.

use thiserror::Error;

/// Unified error type for promptpush.
///
/// Library functions return `Result<T, AppError>`; the binary turns any
/// error into a printed message and exit status 1.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors, including missing credentials
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prompt file loading and entry lookup errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Errors raised by the remote hub or while talking to it
    #[error("Hub error: {0}")]
    Hub(String),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
