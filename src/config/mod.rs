//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.orgwatch.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `ORGWATCH_ORG`, `ORGWATCH_TOKEN`, and so on,
//!    plus the fallbacks `GITHUB_TOKEN` and `GITHUB_ORG`
//! 4. **Command-line arguments** – `--org`/`-o`, `--token`/`-t`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! org = "acme"
//! token = "ghp_example"
//! topic = "ops"
//! repo_type = "sources"
//! action = "list"
//! codeowners = true
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::WatchError;
use crate::github::gateway::RepositoryType;
use crate::github::locator::{ApiBase, OrganisationName};

/// Topic value that makes subscription workflows read names from stdin.
pub const STDIN_TOPIC: &str = "-";

/// What the binary should do, selected by the `action` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationMode {
    /// Print the organisation's repositories.
    #[default]
    List,
    /// Print the caller's subscriptions owned by the organisation.
    Subscribed,
    /// Subscribe to repositories from a topic search or stdin.
    Subscribe,
    /// Unsubscribe from repositories named on stdin.
    Unsubscribe,
    /// Print the oldest commit of a single repository.
    FirstCommit,
}

impl OperationMode {
    /// The `action` spelling of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Subscribed => "subscribed",
            Self::Subscribe => "subscribe",
            Self::Unsubscribe => "unsubscribe",
            Self::FirstCommit => "first-commit",
        }
    }
}

impl FromStr for OperationMode {
    type Err = WatchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "list" => Ok(Self::List),
            "subscribed" => Ok(Self::Subscribed),
            "subscribe" => Ok(Self::Subscribe),
            "unsubscribe" => Ok(Self::Unsubscribe),
            "first-commit" => Ok(Self::FirstCommit),
            other => Err(WatchError::Configuration {
                message: format!(
                    "unknown action '{other}' (expected list, subscribed, subscribe, \
                     unsubscribe or first-commit)"
                ),
            }),
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `ORGWATCH_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `ORGWATCH_ORG`, `GITHUB_ORG`, or `--org`: Organisation login
/// - `ORGWATCH_TOPIC` or `--topic`: Topic filter, or `-` to read names from
///   stdin
/// - `ORGWATCH_REPO_TYPE` or `--repo-type`: Org listing type filter
/// - `ORGWATCH_ACTION` or `--action`: Operation to perform
/// - `ORGWATCH_REPO` or `--repo`: Repository for `first-commit`
/// - `ORGWATCH_API_BASE` or `--api-base`: GitHub Enterprise API root
///
/// # Example
///
/// ```no_run
/// use orgwatch::OrgwatchConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = OrgwatchConfig::load().expect("failed to load configuration");
/// let org = config.require_org().expect("organisation required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "ORGWATCH",
    discovery(
        dotfile_name = ".orgwatch.toml",
        config_file_name = "orgwatch.toml",
        app_name = "orgwatch"
    )
)]
pub struct OrgwatchConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `ORGWATCH_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Organisation whose repositories are listed or subscribed to.
    ///
    /// Can be provided via:
    /// - CLI: `--org <ORG>` or `-o <ORG>`
    /// - Environment: `ORGWATCH_ORG` or `GITHUB_ORG`
    /// - Config file: `org = "..."`
    #[ortho_config(cli_short = 'o')]
    pub org: Option<String>,

    /// Topic used to narrow the organisation's repositories.
    ///
    /// `-` tells the subscription workflows to read repository names from
    /// stdin instead of searching.
    #[ortho_config(cli_short = 'p')]
    pub topic: Option<String>,

    /// Org listing type filter (`all`, `public`, `private`, `forks`,
    /// `sources`, `member`). Defaults to `all`. Ignored by topic search.
    ///
    /// CLI: `--repo-type <TYPE>` or `-y <TYPE>`.
    #[ortho_config(cli_short = 'y')]
    pub repo_type: Option<String>,

    /// Operation to perform. Defaults to `list`.
    #[ortho_config(cli_short = 'a')]
    pub action: Option<String>,

    /// Keep only repositories that have a `.github/CODEOWNERS` file.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so use the CLI flag or the config file.
    #[ortho_config(cli_short = 'c')]
    pub codeowners: bool,

    /// Full `owner/name` of the repository inspected by `first-commit`.
    ///
    /// CLI: `--repo <OWNER/NAME>` or `-r <OWNER/NAME>`.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// API root for GitHub Enterprise, e.g. `https://ghe.example.com`.
    #[ortho_config()]
    pub api_base: Option<String>,

    /// Emit diagnostics as JSON lines instead of human-readable text.
    #[ortho_config()]
    pub jsonl_diagnostics: bool,
}

impl OrgwatchConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, WatchError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(WatchError::MissingToken)
    }

    /// Resolves the organisation from configuration or the `GITHUB_ORG`
    /// environment variable.
    ///
    /// The value is used exactly as given; surrounding whitespace is kept.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::MissingOrganisation`] when no source provides a
    /// non-empty value.
    pub fn require_org(&self) -> Result<OrganisationName, WatchError> {
        let value = self
            .org
            .clone()
            .or_else(|| env::var("GITHUB_ORG").ok())
            .ok_or(WatchError::MissingOrganisation)?;

        OrganisationName::new(value)
    }

    /// Returns the topic filter, treating an empty value as absent.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref().filter(|topic| !topic.is_empty())
    }

    /// Returns true when repository names should be read from stdin.
    #[must_use]
    pub fn reads_names_from_stdin(&self) -> bool {
        self.topic() == Some(STDIN_TOPIC)
    }

    /// Parses the configured repository type, defaulting to `all`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::InvalidRepositoryType`] for unknown values.
    pub fn repository_type(&self) -> Result<RepositoryType, WatchError> {
        self.repo_type
            .as_deref()
            .map_or(Ok(RepositoryType::default()), str::parse)
    }

    /// Determines the operation from the `action` setting.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Configuration`] for unknown actions.
    pub fn operation_mode(&self) -> Result<OperationMode, WatchError> {
        self.action
            .as_deref()
            .map_or(Ok(OperationMode::default()), str::parse)
    }

    /// Returns the repository inspected by `first-commit`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Configuration`] when no repository is set or it
    /// is not in `owner/name` form.
    pub fn require_repo(&self) -> Result<&str, WatchError> {
        let repo = self
            .repo
            .as_deref()
            .ok_or_else(|| WatchError::Configuration {
                message: "repository is required for first-commit (use --repo or -r)".to_owned(),
            })?;

        match repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(repo),
            _ => Err(WatchError::Configuration {
                message: format!("repository must be given as owner/name, got '{repo}'"),
            }),
        }
    }

    /// Returns the API root to talk to, defaulting to public GitHub.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::InvalidUrl`] when `api_base` cannot be parsed.
    pub fn api_base(&self) -> Result<ApiBase, WatchError> {
        self.api_base
            .as_deref()
            .map_or_else(ApiBase::public, ApiBase::parse)
    }
}

#[cfg(test)]
mod tests;
