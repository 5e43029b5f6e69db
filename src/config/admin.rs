//! Admin endpoint configuration (_admin.yml + environment)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{SubmitError, SubmitResult};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "_admin.yml";

/// Environment variable names
pub const ENV_ADMIN_KEY: &str = "CUSTOM_ADMIN_KEY";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_CONTENTS_TOKEN";
pub const ENV_GITHUB_REPO: &str = "GITHUB_REPO";
pub const ENV_GITHUB_BRANCH: &str = "GITHUB_BRANCH";
pub const ENV_GITHUB_API_BASE: &str = "GITHUB_API_BASE";
pub const ENV_ADDR: &str = "BEGRIP_ADMIN_ADDR";

/// Endpoint configuration, resolved once at startup
///
/// Secrets are kept as `Option` so that a half-configured deployment still
/// boots and answers each request with a configuration error.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared secret expected in the `x-admin-key` header
    pub admin_key: Option<String>,
    /// Bearer token for the GitHub contents API
    pub github_token: Option<String>,
    /// Target repository as `owner/repo`
    pub github_repo: Option<String>,
    pub github_branch: String,
    pub github_api_base: String,
    pub user_agent: String,

    /// Listen address for `serve`
    pub addr: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            admin_key: None,
            github_token: None,
            github_repo: None,
            github_branch: "main".to_string(),
            github_api_base: "https://api.github.com".to_string(),
            user_agent: "begrip-custom-admin".to_string(),
            addr: "127.0.0.1:8888".to_string(),
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(secret: &Option<String>) -> &'static str {
            if secret.is_some() {
                "<set>"
            } else {
                "<missing>"
            }
        }

        f.debug_struct("AdminConfig")
            .field("admin_key", &redact(&self.admin_key))
            .field("github_token", &redact(&self.github_token))
            .field("github_repo", &self.github_repo)
            .field("github_branch", &self.github_branch)
            .field("github_api_base", &self.github_api_base)
            .field("user_agent", &self.user_agent)
            .field("addr", &self.addr)
            .finish()
    }
}

/// The repository a submission is committed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub token: String,
}

impl AdminConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config {:?}", path.as_ref()))?;
        let config: AdminConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Resolve the configuration used by the process
    ///
    /// Reads `.env` if present, then the config file (explicit path, or
    /// `_admin.yml` when it exists), then lets environment variables win.
    pub fn resolve(config_path: Option<&Path>) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {:?}", path);
        }

        let config = match config_path {
            Some(path) => Self::load(path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::load(CONFIG_FILE)?,
            None => Self::default(),
        };

        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Override fields from an environment lookup
    ///
    /// Empty values count as unset.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_ADMIN_KEY) {
            self.admin_key = Some(v);
        }
        if let Some(v) = get(ENV_GITHUB_TOKEN) {
            self.github_token = Some(v);
        }
        if let Some(v) = get(ENV_GITHUB_REPO) {
            self.github_repo = Some(v);
        }
        if let Some(v) = get(ENV_GITHUB_BRANCH) {
            self.github_branch = v;
        }
        if let Some(v) = get(ENV_GITHUB_API_BASE) {
            self.github_api_base = v;
        }
        if let Some(v) = get(ENV_ADDR) {
            self.addr = v;
        }
        self
    }

    /// The configured admin secret
    pub fn admin_key(&self) -> SubmitResult<&str> {
        match self.admin_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(SubmitError::Configuration(format!(
                "Server misconfigured: {} missing",
                ENV_ADMIN_KEY
            ))),
        }
    }

    /// The repository to write to, with its credential
    pub fn repository(&self) -> SubmitResult<RepositoryTarget> {
        let token = self.github_token.as_deref().filter(|t| !t.is_empty());
        let repo = self.github_repo.as_deref().filter(|r| !r.is_empty());

        let (Some(token), Some(full_name)) = (token, repo) else {
            return Err(SubmitError::Configuration(
                "Server misconfigured: missing GitHub env vars".to_string(),
            ));
        };

        let (owner, repo) = split_repo(full_name).ok_or_else(|| {
            SubmitError::Configuration(format!(
                "{} must be in format owner/repo",
                ENV_GITHUB_REPO
            ))
        })?;

        let branch = if self.github_branch.is_empty() {
            "main".to_string()
        } else {
            self.github_branch.clone()
        };

        Ok(RepositoryTarget {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch,
            token: token.to_string(),
        })
    }

    /// Configuration problems a submission would run into
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Err(e) = self.admin_key() {
            problems.push(e.to_string());
        }
        if let Err(e) = self.repository() {
            problems.push(e.to_string());
        }
        problems
    }
}

/// Split `owner/repo` into exactly two non-empty segments
fn split_repo(full_name: &str) -> Option<(&str, &str)> {
    let mut parts = full_name.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Some((owner, repo))
        }
        _ => None,
    }
}
