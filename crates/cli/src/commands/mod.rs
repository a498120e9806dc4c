//! Command handlers for the promptpush CLI.

pub mod check;
pub mod push;

pub use check::CheckCommand;
pub use push::PushCommand;
