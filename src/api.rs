use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Issue, RepositorySummary};

/// Read-only view of a remote repository host.
///
/// The identifier is whatever the route carried (normally `owner/name`) and is
/// passed through to the host without validation.
#[async_trait]
pub trait RepositoryApi: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    async fn get_repository(&self, identifier: &str) -> Result<RepositorySummary>;
    async fn list_issues(&self, identifier: &str) -> Result<Vec<Issue>>;
}
