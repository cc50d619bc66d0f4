use serde::{Deserialize, Deserializer};

/// Repository metadata shown in the summary block
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

/// Open issue as returned by the issues endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    pub user: IssueAuthor,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueAuthor {
    pub login: String,
}

// GitHub sends `"description": null` for repositories without one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
