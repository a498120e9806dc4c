//! LangSmith prompt hub implementation.
//!
//! A push is three steps against the LangSmith REST API:
//! 1. `GET /repos/{owner}/{repo}`, creating the repo with `POST /repos/` on 404
//! 2. `GET /commits/{owner}/{repo}/` for the latest commit (the parent)
//! 3. `POST /commits/{owner}/{repo}` with the manifest
//!
//! The owner `-` means "the tenant that owns the API key".

use crate::client::{HubClient, PushReceipt, PushRequest};
use promptpush_core::{AppError, AppResult};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default LangSmith API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.smith.langchain.com";

/// Web UI matching [`DEFAULT_ENDPOINT`].
const DEFAULT_WEB_URL: &str = "https://smith.langchain.com";

/// Owner placeholder resolved server-side to the key's tenant.
const CURRENT_TENANT: &str = "-";

const API_KEY_HEADER: &str = "x-api-key";

/// Repo creation body.
#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    repo_handle: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    tags: &'a [String],
}

/// Commit creation body.
#[derive(Debug, Serialize)]
struct CreateCommitRequest<'a> {
    manifest: &'a serde_json::Value,
    parent_commit: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CommitList {
    #[serde(default)]
    commits: Vec<CommitSummary>,
}

#[derive(Debug, Deserialize)]
struct CommitSummary {
    commit_hash: String,
}

#[derive(Debug, Deserialize)]
struct CreateCommitResponse {
    commit: CommitSummary,
}

/// Outcome of the commit step.
#[derive(Debug, PartialEq, Eq)]
enum CommitOutcome {
    Created(String),
    Unchanged,
}

/// LangSmith hub client.
pub struct LangSmithClient {
    /// Base URL for the LangSmith API
    base_url: String,

    api_key: String,

    /// Repo owner used in API paths
    owner: String,

    /// Handle shown in web URLs when the owner is the current tenant
    username: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl LangSmithClient {
    /// Create a client for the default endpoint with a 30 second timeout.
    pub fn new(api_key: impl Into<String>) -> AppResult<Self> {
        Self::with_base_url(api_key, DEFAULT_ENDPOINT, Duration::from_secs(30))
    }

    /// Create a client for a custom endpoint.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Hub(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            owner: CURRENT_TENANT.to_string(),
            username: None,
            client,
        })
    }

    /// Publish under an explicit owner instead of the key's tenant.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Handle to show in web URLs.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Split `owner/name` identifiers; bare names use the configured owner.
    fn split_identifier<'a>(&'a self, identifier: &'a str) -> AppResult<(&'a str, &'a str)> {
        let (owner, repo) = match identifier.split_once('/') {
            Some((owner, repo)) => (owner, repo),
            None => (self.owner.as_str(), identifier),
        };

        let valid = !repo.is_empty()
            && repo
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid || owner.is_empty() {
            return Err(AppError::Hub(format!(
                "Invalid prompt identifier '{}': use letters, digits, '-' or '_'",
                identifier
            )));
        }

        Ok((owner, repo))
    }

    fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}", self.base_url, owner, repo)
    }

    fn commits_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/commits/{}/{}", self.base_url, owner, repo)
    }

    /// Web URL of a published prompt. Only known for the hosted LangSmith.
    fn prompt_url(&self, owner: &str, repo: &str, commit_hash: Option<&str>) -> Option<String> {
        if self.base_url != DEFAULT_ENDPOINT {
            return None;
        }

        let handle = match (owner, self.username.as_deref()) {
            (CURRENT_TENANT, Some(username)) => username,
            (CURRENT_TENANT, None) => return Some(format!("{}/hub", DEFAULT_WEB_URL)),
            (owner, _) => owner,
        };

        let suffix = commit_hash
            .map(|hash| format!(":{}", hash.chars().take(8).collect::<String>()))
            .unwrap_or_default();

        Some(format!("{}/hub/{}/{}{}", DEFAULT_WEB_URL, handle, repo, suffix))
    }

    async fn repo_exists(&self, owner: &str, repo: &str) -> AppResult<bool> {
        let response = self
            .client
            .get(self.repo_url(owner, repo))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to reach LangSmith: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(api_error(response).await),
        }
    }

    async fn create_repo(&self, repo: &str, request: &PushRequest) -> AppResult<()> {
        let body = CreateRepoRequest {
            repo_handle: repo,
            description: request.description.as_deref(),
            tags: &request.tags,
        };

        tracing::info!("Creating LangSmith prompt repository: {}", repo);

        let response = self
            .client
            .post(format!("{}/repos/", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to create prompt repository: {}", e)))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }

    async fn latest_commit(&self, owner: &str, repo: &str) -> AppResult<Option<String>> {
        let response = self
            .client
            .get(format!("{}/", self.commits_url(owner, repo)))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("limit", "1"), ("offset", "0")])
            .send()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to list commits: {}", e)))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let list: CommitList = response
            .json()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to parse commit list: {}", e)))?;

        Ok(list.commits.into_iter().next().map(|c| c.commit_hash))
    }

    async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        manifest: &serde_json::Value,
        parent_commit: Option<&str>,
    ) -> AppResult<CommitOutcome> {
        let body = CreateCommitRequest {
            manifest,
            parent_commit,
        };

        let response = self
            .client
            .post(self.commits_url(owner, repo))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to send commit to LangSmith: {}", e)))?;

        // 409: the latest commit already holds this manifest
        if response.status() == StatusCode::CONFLICT {
            return Ok(CommitOutcome::Unchanged);
        }

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let created: CreateCommitResponse = response
            .json()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to parse commit response: {}", e)))?;

        Ok(CommitOutcome::Created(created.commit.commit_hash))
    }
}

/// Turn a non-success response into a hub error carrying status and body.
async fn api_error(response: reqwest::Response) -> AppError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    AppError::Hub(format!("LangSmith API error ({}): {}", status, error_text))
}

#[async_trait::async_trait]
impl HubClient for LangSmithClient {
    fn hub_name(&self) -> &str {
        "langsmith"
    }

    async fn push(&self, request: &PushRequest) -> AppResult<PushReceipt> {
        let (owner, repo) = self.split_identifier(&request.identifier)?;
        tracing::info!("Pushing prompt to LangSmith: {}/{}", owner, repo);

        let created = if self.repo_exists(owner, repo).await? {
            false
        } else {
            self.create_repo(repo, request).await?;
            true
        };

        let parent = if created {
            None
        } else {
            self.latest_commit(owner, repo).await?
        };
        tracing::debug!("Parent commit: {:?}", parent);

        let manifest = request.template.to_manifest();
        let outcome = self
            .create_commit(owner, repo, &manifest, parent.as_deref())
            .await?;

        let commit_hash = match outcome {
            CommitOutcome::Created(hash) => {
                tracing::info!("Created commit {} for {}", hash, repo);
                Some(hash)
            }
            CommitOutcome::Unchanged => {
                tracing::info!("No changes to commit for {}", repo);
                None
            }
        };

        Ok(PushReceipt {
            identifier: request.identifier.clone(),
            url: self.prompt_url(owner, repo, commit_hash.as_deref().or(parent.as_deref())),
            unchanged: commit_hash.is_none(),
            commit_hash,
            created,
        })
    }
}
