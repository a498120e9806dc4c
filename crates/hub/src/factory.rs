//! Hub client factory.
//!
//! Resolves the configured hub kind and wires credentials and endpoint
//! settings into the matching client implementation.

use crate::client::HubClient;
use crate::providers::langsmith::{LangSmithClient, DEFAULT_ENDPOINT};
use crate::types::HubKind;
use promptpush_core::{AppError, AppResult, HubCredentials, HubSettings};
use std::sync::Arc;
use std::time::Duration;

/// Create a hub client from settings and credentials.
///
/// # Errors
/// Returns a `Config` error if the hub kind is unknown, or a `Hub` error if
/// the HTTP client cannot be built.
pub fn create_client(
    settings: &HubSettings,
    credentials: &HubCredentials,
) -> AppResult<Arc<dyn HubClient>> {
    let kind = HubKind::parse(&settings.provider).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown hub provider: {}. Supported: {}",
            settings.provider,
            HubKind::LangSmith.as_str()
        ))
    })?;

    match kind {
        HubKind::LangSmith => {
            let endpoint = settings.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
            tracing::debug!("Using LangSmith endpoint: {}", endpoint);

            let mut client = LangSmithClient::with_base_url(
                credentials.api_key.as_str(),
                endpoint,
                Duration::from_secs(settings.timeout_secs),
            )?
            .with_username(credentials.username.as_str());

            if let Some(ref owner) = settings.owner {
                client = client.with_owner(owner.as_str());
            }

            Ok(Arc::new(client))
        }
    }
}
