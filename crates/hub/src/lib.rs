//! Prompt hub integration for promptpush.
//!
//! Publishing goes through the [`HubClient`] trait so the orchestration does
//! not care which hub sits behind it.
//!
//! # Hubs
//! - **LangSmith**: LangChain's hosted prompt hub (default)
//!
//! # Example
//! ```no_run
//! use promptpush_hub::{providers::LangSmithClient, Publisher};
//! use promptpush_prompt::load_prompt;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record = load_prompt(Path::new("prompts/bug_to_user_story_v2.yml"), "bug_to_user_story_v2")?;
//! let client = LangSmithClient::new("lsv2_...")?;
//! let published = Publisher::new(Arc::new(client))
//!     .publish("bug_to_user_story_v2", &record)
//!     .await;
//! println!("published: {}", published);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod publisher;
pub mod template;
pub mod types;

// Re-export main types
pub use client::{HubClient, PushReceipt, PushRequest};
pub use factory::create_client;
pub use providers::LangSmithClient;
pub use publisher::Publisher;
pub use template::{ChatPromptTemplate, MessageRole, MessageTemplate};
pub use types::HubKind;
