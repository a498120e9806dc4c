//! Prompt records for promptpush.
//!
//! This crate provides:
//! - YAML prompt files holding one or more named prompt records
//! - Structural validation (missing fields, thin content)
//! - Content lint for bug-to-user-story prompts

pub mod lint;
pub mod loader;
pub mod types;
pub mod validator;

// Re-export main types
pub use lint::{lint, LintCheck, LintFinding, LintReport};
pub use loader::{list_prompt_files, load_catalog, load_prompt, PromptCatalog};
pub use types::{PromptRecord, Technique};
pub use validator::{validate, ValidationProblem, ValidationReport};
