//! Configuration management for promptpush.
//!
//! Settings are merged from several sources, highest precedence first:
//! - Command-line flags
//! - Environment variables (a `.env` file in the working directory is loaded first)
//! - Config file (`.promptpush/config.yaml` in the workspace)
//! - Built-in defaults
//!
//! Hub credentials are only read from the environment, never from the config file.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Environment variable holding the hub API key.
pub const API_KEY_ENV: &str = "LANGSMITH_API_KEY";

/// Environment variable holding the hub username (tenant handle).
pub const USERNAME_ENV: &str = "USERNAME_LANGSMITH_HUB";

/// Environment variable overriding the hub API endpoint.
pub const ENDPOINT_ENV: &str = "LANGSMITH_ENDPOINT";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Workspace root; relative prompt paths resolve against it
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Remote hub settings
    pub hub: HubSettings,

    /// Which prompt file and entry to publish
    pub prompt: PromptSettings,

    /// Hub API key, captured from the environment at startup
    pub api_key: Option<String>,

    /// Hub username, captured from the environment at startup
    pub username: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Problems noticed while loading, reported once logging is up
    pub warnings: Vec<String>,
}

/// Remote hub settings.
#[derive(Debug, Clone)]
pub struct HubSettings {
    /// Hub implementation (currently only "langsmith")
    pub provider: String,

    /// API base URL; the provider default applies when unset
    pub endpoint: Option<String>,

    /// Repository owner; unset means the tenant owning the API key
    pub owner: Option<String>,

    /// Prefix of the published identifier (`<prefix>_<version>`)
    pub prompt_prefix: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            provider: "langsmith".to_string(),
            endpoint: None,
            owner: None,
            prompt_prefix: "bug_to_user_story".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Location of the prompt to publish.
#[derive(Debug, Clone)]
pub struct PromptSettings {
    /// YAML file, relative to the workspace unless absolute
    pub file: PathBuf,

    /// Top-level key of the entry inside the file
    pub key: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("prompts/bug_to_user_story_v2.yml"),
            key: "bug_to_user_story_v2".to_string(),
        }
    }
}

/// Credentials required to talk to the hub.
#[derive(Clone, PartialEq, Eq)]
pub struct HubCredentials {
    pub api_key: String,
    pub username: String,
}

impl fmt::Debug for HubCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubCredentials")
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    hub: Option<HubSection>,
    prompt: Option<PromptSection>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct HubSection {
    provider: Option<String>,
    endpoint: Option<String>,
    owner: Option<String>,
    #[serde(rename = "promptPrefix")]
    prompt_prefix: Option<String>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PromptSection {
    file: Option<PathBuf>,
    key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            hub: HubSettings::default(),
            prompt: PromptSettings::default(),
            api_key: None,
            username: None,
            log_level: None,
            verbose: false,
            no_color: false,
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, the process environment and the config file.
    ///
    /// `workspace` and `config_file` come from the command line and win over
    /// `PROMPTPUSH_WORKSPACE` / `PROMPTPUSH_CONFIG`.
    ///
    /// Environment variables:
    /// - `PROMPTPUSH_WORKSPACE`: Override workspace path
    /// - `PROMPTPUSH_CONFIG`: Path to config file
    /// - `LANGSMITH_API_KEY`: Hub API key
    /// - `USERNAME_LANGSMITH_HUB`: Hub username
    /// - `LANGSMITH_ENDPOINT`: Hub API base URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// A `.env` that exists but cannot be parsed is skipped and reported in
    /// [`AppConfig::warnings`].
    ///
    /// # Example
    /// ```no_run
    /// use promptpush_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None, None).expect("Failed to load config");
    /// println!("Prompt file: {:?}", config.prompt_path());
    /// ```
    pub fn load(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let env_file_warning = dotenv_warning(dotenvy::dotenv());

        let mut config =
            Self::load_with(workspace, config_file, |name| std::env::var(name).ok())?;
        config.warnings.extend(env_file_warning);
        Ok(config)
    }

    /// Load configuration using `lookup` in place of the process environment.
    pub fn load_with<F>(
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        lookup: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let workspace = workspace.or_else(|| lookup("PROMPTPUSH_WORKSPACE").map(PathBuf::from));
        if let Some(workspace) = workspace {
            config.workspace = workspace;
        }

        config.config_file =
            config_file.or_else(|| lookup("PROMPTPUSH_CONFIG").map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.workspace.join(".promptpush/config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            config.hub.endpoint = Some(endpoint);
        }

        config.api_key = lookup(API_KEY_ENV);
        config.username = lookup(USERNAME_ENV);

        if let Some(level) = lookup("RUST_LOG") {
            config.log_level = Some(level);
        }

        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(hub) = config_file.hub {
            if let Some(provider) = hub.provider {
                result.hub.provider = provider;
            }
            if hub.endpoint.is_some() {
                result.hub.endpoint = hub.endpoint;
            }
            if hub.owner.is_some() {
                result.hub.owner = hub.owner;
            }
            if let Some(prefix) = hub.prompt_prefix {
                result.hub.prompt_prefix = prefix;
            }
            if let Some(timeout) = hub.timeout_secs {
                result.hub.timeout_secs = timeout;
            }
        }

        if let Some(prompt) = config_file.prompt {
            if let Some(file) = prompt.file {
                result.prompt.file = file;
            }
            if let Some(key) = prompt.key {
                result.prompt.key = key;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and
    /// the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        prompt_file: Option<PathBuf>,
        prompt_key: Option<String>,
        endpoint: Option<String>,
        owner: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(file) = prompt_file {
            self.prompt.file = file;
        }

        if let Some(key) = prompt_key {
            self.prompt.key = key;
        }

        if let Some(endpoint) = endpoint {
            self.hub.endpoint = Some(endpoint);
        }

        if let Some(owner) = owner {
            self.hub.owner = Some(owner);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Absolute path of the prompt file.
    pub fn prompt_path(&self) -> PathBuf {
        if self.prompt.file.is_absolute() {
            self.prompt.file.clone()
        } else {
            self.workspace.join(&self.prompt.file)
        }
    }

    /// Directory holding the prompt file.
    pub fn prompts_dir(&self) -> PathBuf {
        let path = self.prompt_path();
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.workspace.clone())
    }

    /// Return the hub credentials, or an error naming every missing variable.
    ///
    /// A variable that is set but blank counts as missing.
    pub fn hub_credentials(&self) -> AppResult<HubCredentials> {
        let api_key = non_blank(self.api_key.as_deref());
        let username = non_blank(self.username.as_deref());

        match (api_key, username) {
            (Some(api_key), Some(username)) => Ok(HubCredentials {
                api_key: api_key.to_string(),
                username: username.to_string(),
            }),
            (api_key, username) => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push(API_KEY_ENV);
                }
                if username.is_none() {
                    missing.push(USERNAME_ENV);
                }
                Err(AppError::Config(format!(
                    "Missing required environment variables: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Warning for a `.env` that exists but could not be loaded; a missing file is fine.
fn dotenv_warning<T>(result: Result<T, dotenvy::Error>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!("Ignoring .env file: {}", e)),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
