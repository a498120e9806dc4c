//! Hub implementations.

pub mod langsmith;

pub use langsmith::LangSmithClient;
