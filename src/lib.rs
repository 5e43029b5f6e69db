//! begrip-admin: content submission bridge for the Begrip website
//!
//! Accepts blog posts and events over HTTP, validates them, renders them to
//! front-matter Markdown and commits the file to the site repository through
//! the GitHub contents API.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod github;
pub mod helpers;
pub mod server;

pub use error::{SubmitError, SubmitResult};

use anyhow::Result;

use config::AdminConfig;
use content::{ContentSubmission, Document};
use github::ContentsClient;

/// The admin application: configuration plus the outbound client
#[derive(Debug, Clone)]
pub struct Admin {
    /// Resolved configuration
    pub config: AdminConfig,
    client: ContentsClient,
}

impl Admin {
    /// Create an admin instance from resolved configuration
    pub fn new(config: AdminConfig) -> Result<Self> {
        let client = ContentsClient::new(&config.github_api_base, &config.user_agent)?;
        Ok(Self::with_client(config, client))
    }

    /// Create an admin instance around an existing contents client
    pub fn with_client(config: AdminConfig, client: ContentsClient) -> Self {
        Self { config, client }
    }

    /// Check a caller-supplied admin key
    ///
    /// A missing server secret is reported before the caller's key is looked at.
    pub fn authorize(&self, provided: Option<&str>) -> SubmitResult<()> {
        let expected = self.config.admin_key()?;
        match provided {
            Some(key) if key == expected => Ok(()),
            _ => Err(SubmitError::Unauthorized),
        }
    }

    /// Validate and render a payload without committing it
    pub fn render(&self, raw: &str) -> SubmitResult<Document> {
        let submission = ContentSubmission::from_json(raw)?;
        Ok(Document::from_submission(&submission))
    }

    /// Validate, render and commit a payload
    ///
    /// Returns the repository path of the new file.
    pub async fn submit(&self, raw: &str) -> SubmitResult<String> {
        let target = self.config.repository()?;
        let document = self.render(raw)?;

        let response = self
            .client
            .create_file(&target, &document.path, &document.content, &document.message)
            .await?;

        tracing::info!(
            "Created {} on {}/{}@{} ({})",
            document.path,
            target.owner,
            target.repo,
            target.branch,
            github::commit_sha(&response).unwrap_or("no sha")
        );

        Ok(document.path)
    }
}
