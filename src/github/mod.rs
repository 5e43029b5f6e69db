//! GitHub contents API client
//!
//! Creates one file per call through `PUT /repos/{owner}/{repo}/contents/{path}`.
//! There is no retry and no existence check: whatever GitHub answers is final.

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;
use serde_json::Value;

use crate::config::RepositoryTarget;
use crate::error::{SubmitError, SubmitResult};
use crate::helpers::{encode_path, join_url};

/// Media type GitHub recommends for REST calls
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Request body for the create-file call
#[derive(Debug, Serialize)]
struct CreateFileRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
}

/// Async client for the contents API
#[derive(Debug, Clone)]
pub struct ContentsClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl ContentsClient {
    /// Create a client against `api_base` (normally `https://api.github.com`)
    pub fn new(api_base: &str, user_agent: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self::with_http_client(http_client, api_base))
    }

    /// Use an already configured `reqwest::Client`
    pub fn with_http_client(http_client: reqwest::Client, api_base: &str) -> Self {
        Self {
            http_client,
            api_base: api_base.to_string(),
        }
    }

    /// URL of a file in the target repository
    pub fn file_url(&self, target: &RepositoryTarget, path: &str) -> String {
        join_url(
            &self.api_base,
            &format!(
                "repos/{}/{}/contents/{}",
                target.owner,
                target.repo,
                encode_path(path)
            ),
        )
    }

    /// Create a new file on the target branch
    ///
    /// Returns GitHub's response payload on success.
    pub async fn create_file(
        &self,
        target: &RepositoryTarget,
        path: &str,
        content: &str,
        message: &str,
    ) -> SubmitResult<Value> {
        let url = self.file_url(target, path);
        let request = CreateFileRequest {
            message,
            content: general_purpose::STANDARD.encode(content.as_bytes()),
            branch: &target.branch,
        };

        tracing::debug!("PUT {} (branch {})", url, target.branch);

        let response = self
            .http_client
            .put(&url)
            .bearer_auth(&target.token)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .json(&request)
            .send()
            .await
            .map_err(|e| SubmitError::RemoteRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            tracing::error!("GitHub rejected {}: {} {}", path, status.as_u16(), body);
            return Err(SubmitError::RemoteWrite {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SubmitError::RemoteRequest(e.to_string()))
    }
}

/// Commit SHA from a create-file response, if present
pub fn commit_sha(response: &Value) -> Option<&str> {
    response.pointer("/commit/sha").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target() -> RepositoryTarget {
        RepositoryTarget {
            owner: "begrip".into(),
            repo: "website".into(),
            branch: "main".into(),
            token: "t".into(),
        }
    }

    #[test]
    fn test_file_url() {
        let client = ContentsClient::new("https://api.github.com/", "test-agent").unwrap();
        assert_eq!(
            client.file_url(&target(), "content/blogs/2024-01-02-a b.md"),
            "https://api.github.com/repos/begrip/website/contents/content/blogs/2024-01-02-a%20b.md"
        );
    }

    #[test]
    fn test_request_body() {
        let request = CreateFileRequest {
            message: "Create blog: Hi",
            content: general_purpose::STANDARD.encode("---\n".as_bytes()),
            branch: "main",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "message": "Create blog: Hi", "content": "LS0tCg==", "branch": "main" })
        );
    }

    #[test]
    fn test_commit_sha() {
        let response = json!({ "content": {}, "commit": { "sha": "abc123" } });
        assert_eq!(commit_sha(&response), Some("abc123"));
        assert_eq!(commit_sha(&json!({})), None);
    }
}
