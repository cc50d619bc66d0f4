use crate::route::Location;
use crate::types::{Issue, RepositorySummary};

#[derive(Debug, Clone)]
pub enum Action {
    Back,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    Select,

    // Navigation
    Navigate(Location),

    // Dashboard input
    Input(char),
    InputBackspace,
    Paste(String),

    // Repository loads, tagged with the generation they were issued under
    RepositoryLoaded(Box<RepositorySummary>, u64),
    RepositoryFailed(String, u64),
    IssuesLoaded(Vec<Issue>, u64),
    IssuesFailed(String, u64),

    Refresh,
    OpenInBrowser,
    YankUrl,

    None,
}
