//! Publishing a prompt record to the hub.
//!
//! The publisher turns a [`PromptRecord`] into a two-message chat template
//! (system, then human) and hands it to a [`HubClient`]. Errors never escape
//! [`Publisher::publish`]: they are printed and reported as `false`.

use crate::client::{HubClient, PushReceipt, PushRequest};
use crate::template::{ChatPromptTemplate, MessageRole};
use promptpush_core::AppResult;
use promptpush_prompt::PromptRecord;
use std::sync::Arc;

/// Default identifier prefix; the identifier is `<prefix>_<version>`.
pub const DEFAULT_PREFIX: &str = "bug_to_user_story";

/// User message used when the record has none.
pub const DEFAULT_USER_PROMPT: &str = "{bug_report}";

/// Version used when the record has none.
pub const DEFAULT_VERSION: &str = "v2";

/// Repository description used when the record has none.
pub const DEFAULT_DESCRIPTION: &str = "Prompt otimizado para bug to user story";

/// Publishes prompt records through a hub client.
pub struct Publisher {
    client: Arc<dyn HubClient>,
    prefix: String,
}

impl Publisher {
    pub fn new(client: Arc<dyn HubClient>) -> Self {
        Self {
            client,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Use a different identifier prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Identifier a record of `version` is published under.
    pub fn identifier_for(&self, version: &str) -> String {
        format!("{}_{}", self.prefix, version)
    }

    /// Build the push request for `record`.
    ///
    /// Absent fields fall back to the defaults above; present-but-empty
    /// fields are used as they are.
    pub fn build_request(&self, record: &PromptRecord) -> AppResult<PushRequest> {
        let system_prompt = record.system_prompt();
        let user_prompt = record.user_prompt.as_deref().unwrap_or(DEFAULT_USER_PROMPT);
        let version = record.version.as_deref().unwrap_or(DEFAULT_VERSION);
        let description = record.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);

        let template = ChatPromptTemplate::from_messages([
            (MessageRole::System, system_prompt),
            (MessageRole::Human, user_prompt),
        ])?;

        Ok(PushRequest::new(self.identifier_for(version), template)
            .with_description(description)
            .with_tags(record.tags.clone()))
    }

    /// Publish `record`, printing the outcome.
    ///
    /// `name` is only used for display. Returns `true` on success and `false`
    /// on any failure; there is no retry.
    pub async fn publish(&self, name: &str, record: &PromptRecord) -> bool {
        match self.try_publish(name, record).await {
            Ok(receipt) => {
                print_success(&receipt, record);
                true
            }
            Err(e) => {
                tracing::error!("Publishing '{}' failed: {}", name, e);
                println!("Error publishing prompt: {}", e);
                false
            }
        }
    }

    async fn try_publish(&self, name: &str, record: &PromptRecord) -> AppResult<PushReceipt> {
        let request = self.build_request(record)?;

        tracing::info!(
            "Publishing '{}' as '{}' to {}",
            name,
            request.identifier,
            self.client.hub_name()
        );
        println!("Pushing prompt: {}", request.identifier);

        self.client.push(&request).await
    }
}

fn print_success(receipt: &PushReceipt, record: &PromptRecord) {
    let version = record.version.as_deref().unwrap_or(DEFAULT_VERSION);

    if receipt.unchanged {
        println!("Prompt already up to date on the hub.");
    } else {
        println!("Prompt pushed to the hub.");
    }
    println!("   Name: {}", receipt.identifier);
    println!("   Version: {}", version);
    println!("   Tags: {}", record.tag_list());
    println!("   Techniques applied: {}", record.techniques.len());
    if let Some(ref hash) = receipt.commit_hash {
        println!("   Commit: {}", hash);
    }
    if let Some(ref url) = receipt.url {
        println!("   URL: {}", url);
    }
}
