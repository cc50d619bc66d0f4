use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::RepositoryApi;
use crate::error::{ExplorerError, Result};
use crate::types::{Issue, RepositorySummary};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub struct GitHub {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GitHub {
    /// Create a client against `base_url` (api.github.com, an Enterprise host, or a test server)
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ExplorerError::Api {
                status: status.as_u16(),
                message: api_message(&text),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// GitHub error bodies look like `{"message": "Not Found", ...}`; fall back to the raw text.
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl RepositoryApi for GitHub {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn get_repository(&self, identifier: &str) -> Result<RepositorySummary> {
        self.get_json(&self.api_url(&format!("/repos/{}", identifier)))
            .await
    }

    async fn list_issues(&self, identifier: &str) -> Result<Vec<Issue>> {
        self.get_json(&self.api_url(&format!("/repos/{}/issues", identifier)))
            .await
    }
}
