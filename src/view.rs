use crate::types::{Issue, RepositorySummary};

/// Summary slot: absent until its fetch resolves
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SummaryState {
    #[default]
    Unloaded,
    Loaded(RepositorySummary),
    Failed(String),
}

impl SummaryState {
    pub fn loaded(&self) -> Option<&RepositorySummary> {
        match self {
            SummaryState::Loaded(summary) => Some(summary),
            _ => None,
        }
    }
}

/// State of the repository screen for one identifier.
///
/// A fresh value is built for every load; results are only committed when the
/// generation they were issued under is still the view's generation.
#[derive(Debug, Clone)]
pub struct RepositoryView {
    pub identifier: String,
    pub generation: u64,
    pub summary: SummaryState,
    pub issues: Vec<Issue>,
    pub issue_index: usize,
}

impl RepositoryView {
    pub fn new(identifier: impl Into<String>, generation: u64) -> Self {
        Self {
            identifier: identifier.into(),
            generation,
            summary: SummaryState::Unloaded,
            issues: Vec::new(),
            issue_index: 0,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Returns false (and leaves state alone) for a superseded generation
    pub fn apply_summary(&mut self, summary: SummaryState, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.summary = summary;
        true
    }

    pub fn apply_issues(&mut self, issues: Vec<Issue>, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.issues = issues;
        self.issue_index = 0;
        true
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.issues.get(self.issue_index)
    }

    pub fn select_prev(&mut self) {
        self.issue_index = self.issue_index.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if !self.issues.is_empty() && self.issue_index < self.issues.len() - 1 {
            self.issue_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.issue_index = 0;
    }

    pub fn select_last(&mut self) {
        self.issue_index = self.issues.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IssueAuthor, Owner};

    fn summary(full_name: &str) -> RepositorySummary {
        RepositorySummary {
            full_name: full_name.to_string(),
            description: String::new(),
            stargazers_count: 1,
            forks_count: 2,
            open_issues_count: 3,
            owner: Owner {
                login: "octo".to_string(),
                avatar_url: "https://avatars.example/octo".to_string(),
            },
        }
    }

    fn issue(id: u64) -> Issue {
        Issue {
            id,
            title: format!("Issue {}", id),
            html_url: format!("https://github.com/octo/repo/issues/{}", id),
            user: IssueAuthor {
                login: "octo".to_string(),
            },
        }
    }

    #[test]
    fn new_view_is_unloaded_and_empty() {
        let view = RepositoryView::new("octo/repo", 1);
        assert_eq!(view.summary, SummaryState::Unloaded);
        assert!(view.issues.is_empty());
        assert!(view.selected_issue().is_none());
    }

    #[test]
    fn current_generation_is_applied() {
        let mut view = RepositoryView::new("octo/repo", 4);
        assert!(view.apply_summary(SummaryState::Loaded(summary("octo/repo")), 4));
        assert!(view.apply_issues(vec![issue(1), issue(2)], 4));
        assert_eq!(view.summary.loaded().unwrap().full_name, "octo/repo");
        assert_eq!(view.issues.len(), 2);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut view = RepositoryView::new("octo/new", 5);
        assert!(!view.apply_summary(SummaryState::Loaded(summary("octo/old")), 4));
        assert!(!view.apply_issues(vec![issue(9)], 4));
        assert_eq!(view.summary, SummaryState::Unloaded);
        assert!(view.issues.is_empty());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut view = RepositoryView::new("octo/repo", 1);
        view.select_next();
        view.select_last();
        assert_eq!(view.issue_index, 0);

        view.apply_issues(vec![issue(1), issue(2), issue(3)], 1);
        view.select_next();
        view.select_next();
        view.select_next();
        assert_eq!(view.selected_issue().unwrap().id, 3);
        view.select_first();
        view.select_prev();
        assert_eq!(view.selected_issue().unwrap().id, 1);
        view.select_last();
        assert_eq!(view.issue_index, 2);
    }
}
