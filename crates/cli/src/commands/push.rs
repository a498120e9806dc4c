//! Push command handler.
//!
//! Validates the configured prompt and publishes it to the hub. Validation
//! problems are printed but never stop the push.

use clap::Args;
use promptpush_core::{config::AppConfig, AppResult, HubCredentials, HubSettings};
use promptpush_hub::{create_client, HubClient, Publisher};
use promptpush_prompt::{load_prompt, validate, PromptRecord};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

/// Validate the prompt and publish it to the hub
#[derive(Args, Debug, Default)]
pub struct PushCommand {}

/// How a push run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Published,
    MissingCredentials,
    LoadFailed,
    ClientFailed,
    PublishFailed,
}

impl PushOutcome {
    /// Process exit status: 0 only when the prompt was published.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Published => 0,
            _ => 1,
        }
    }
}

impl PushCommand {
    /// Execute the push command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        tracing::info!("Executing push command");

        let outcome = run_push(config, load_prompt, create_client).await;
        tracing::debug!("Push outcome: {:?}", outcome);

        Ok(ExitCode::from(outcome.exit_code()))
    }
}

/// Credential check, load, validate, summarize, publish.
///
/// `load` and `connect` are the file and hub collaborators; `load` is never
/// called when credentials are missing.
pub async fn run_push<L, C>(config: &AppConfig, load: L, connect: C) -> PushOutcome
where
    L: FnOnce(&Path, &str) -> AppResult<PromptRecord>,
    C: FnOnce(&HubSettings, &HubCredentials) -> AppResult<Arc<dyn HubClient>>,
{
    print_header("PUSH OPTIMIZED PROMPTS TO LANGSMITH");

    let credentials = match config.hub_credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("{}", e);
            println!("Environment variables not configured: {}", e);
            return PushOutcome::MissingCredentials;
        }
    };

    let path = config.prompt_path();
    let key = config.prompt.key.as_str();

    let record = match load(&path, key) {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("{}", e);
            println!("Failed to load {}: {}", path.display(), e);
            return PushOutcome::LoadFailed;
        }
    };

    let report = validate(&record);
    if !report.is_valid {
        tracing::warn!("Prompt '{}' has {} validation problems", key, report.problems.len());
        println!("\nValidation problems found:");
        for message in report.messages() {
            println!("  - {}", message);
        }
        println!();
    }

    print_summary(&record);

    let client = match connect(&config.hub, &credentials) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            println!("Failed to create hub client: {}", e);
            return PushOutcome::ClientFailed;
        }
    };

    let published = Publisher::new(client)
        .with_prefix(config.hub.prompt_prefix.as_str())
        .publish(key, &record)
        .await;

    if published {
        println!("\nSUCCESS! Prompt '{}' was pushed to the prompt hub.", key);
        println!("Visibility is managed on the hub dashboard.");
        PushOutcome::Published
    } else {
        println!("\nFAILED! Could not push prompt '{}' to the prompt hub.", key);
        PushOutcome::PublishFailed
    }
}

fn print_header(title: &str) {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("{}", title);
    println!("{}", rule);
}

fn print_summary(record: &PromptRecord) {
    println!("\nPrompt summary:");
    println!(
        "  Description: {}",
        record.description.as_deref().unwrap_or("N/A")
    );
    println!("  Version: {}", record.version.as_deref().unwrap_or("N/A"));
    println!("  Tags: {}", record.tag_list());
    println!("  Techniques: {} applied", record.techniques.len());
    println!();
}
