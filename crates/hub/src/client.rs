//! Hub client abstraction and push request/receipt types.

use crate::template::ChatPromptTemplate;
use promptpush_core::AppResult;
use serde::{Deserialize, Serialize};

/// A prompt to publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Hub identifier, optionally `owner/name`
    pub identifier: String,

    /// Chat template to store
    pub template: ChatPromptTemplate,

    /// Repository description, used when the hub creates the prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Repository tags, used when the hub creates the prompt
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PushRequest {
    /// Create a push request with required fields.
    pub fn new(identifier: impl Into<String>, template: ChatPromptTemplate) -> Self {
        Self {
            identifier: identifier.into(),
            template,
            description: None,
            tags: Vec::new(),
        }
    }

    /// Set the repository description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the repository tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// What the hub reported after a push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushReceipt {
    /// Identifier the prompt was stored under
    pub identifier: String,

    /// Web URL of the published prompt, when the hub exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Hash of the new commit; `None` when nothing changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,

    /// True when the push created the prompt repository
    #[serde(default)]
    pub created: bool,

    /// True when the hub already held an identical manifest
    #[serde(default)]
    pub unchanged: bool,
}

/// Trait for prompt hubs.
///
/// A push is all-or-nothing from the caller's point of view: it either
/// returns a receipt or an error, and is never retried here.
#[async_trait::async_trait]
pub trait HubClient: Send + Sync {
    /// Get the hub name (e.g., "langsmith").
    fn hub_name(&self) -> &str;

    /// Publish a chat template under `request.identifier`.
    async fn push(&self, request: &PushRequest) -> AppResult<PushReceipt>;
}
