use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::Action;
use crate::api::RepositoryApi;
use crate::error::{ExplorerError, Result};
use crate::event::Event;
use crate::route::{Location, Navigator, DASHBOARD_PATH};
use crate::view::{RepositoryView, SummaryState};

const MAX_RECENT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,  // Identifier input + repositories opened this session
    Repository, // Summary block + issues panel
}

pub struct App {
    pub screen: Screen,
    pub navigator: Navigator,

    // Dashboard
    pub input: String,
    pub recent: Vec<String>,
    pub recent_index: usize,

    // Repository screen, present while the route points at a repository
    pub repository: Option<RepositoryView>,

    pub error: Option<String>,
    pub should_quit: bool,
    generation: u64,
    api: Arc<dyn RepositoryApi>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        api: Arc<dyn RepositoryApi>,
        location: Location,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let mut app = Self {
            screen: Screen::Dashboard,
            navigator: Navigator::new(location),
            input: String::new(),
            recent: Vec::new(),
            recent_index: 0,
            repository: None,
            error: None,
            should_quit: false,
            generation: 0,
            api,
            action_tx,
        };
        app.sync_route();
        app
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) if self.screen == Screen::Dashboard => Action::Paste(text),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        match self.screen {
            Screen::Dashboard => match key.code {
                KeyCode::Esc => Action::Back,
                KeyCode::Enter => Action::Select,
                KeyCode::Up => Action::ScrollUp,
                KeyCode::Down => Action::ScrollDown,
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Char(c) => Action::Input(c),
                _ => Action::None,
            },
            Screen::Repository => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') | KeyCode::Char('b') => {
                    Action::Back
                }
                KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
                KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
                KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
                KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
                KeyCode::Enter => Action::Select,
                KeyCode::Char('o') => Action::OpenInBrowser,
                KeyCode::Char('y') => Action::YankUrl,
                KeyCode::Char('r') => Action::Refresh,
                _ => Action::None,
            },
        }
    }

    pub fn update(&mut self, action: Action) {
        // Load results arrive asynchronously and must not wipe an error the user hasn't seen
        let from_user = !matches!(
            action,
            Action::RepositoryLoaded(..)
                | Action::RepositoryFailed(..)
                | Action::IssuesLoaded(..)
                | Action::IssuesFailed(..)
                | Action::None
        );
        if from_user {
            self.error = None;
        }

        match action {
            Action::Back => match self.screen {
                Screen::Dashboard => {
                    if self.input.is_empty() {
                        self.should_quit = true;
                    } else {
                        self.input.clear();
                    }
                }
                Screen::Repository => self.navigate(Location::new(DASHBOARD_PATH)),
            },
            Action::ScrollUp => match self.screen {
                Screen::Dashboard => {
                    self.recent_index = self.recent_index.saturating_sub(1);
                }
                Screen::Repository => {
                    if let Some(view) = &mut self.repository {
                        view.select_prev();
                    }
                }
            },
            Action::ScrollDown => match self.screen {
                Screen::Dashboard => {
                    if !self.recent.is_empty() && self.recent_index < self.recent.len() - 1 {
                        self.recent_index += 1;
                    }
                }
                Screen::Repository => {
                    if let Some(view) = &mut self.repository {
                        view.select_next();
                    }
                }
            },
            Action::GoToTop => {
                if let Some(view) = &mut self.repository {
                    view.select_first();
                }
            }
            Action::GoToBottom => {
                if let Some(view) = &mut self.repository {
                    view.select_last();
                }
            }
            Action::Select => match self.screen {
                Screen::Dashboard => {
                    let typed = self.input.trim().to_string();
                    let target = if typed.is_empty() {
                        self.recent.get(self.recent_index).cloned()
                    } else {
                        Some(typed)
                    };
                    if let Some(identifier) = target {
                        self.update(Action::Navigate(Location::repository(&identifier)));
                    }
                }
                Screen::Repository => self.update(Action::OpenInBrowser),
            },

            Action::Navigate(location) => {
                self.input.clear();
                self.navigate(location);
            }

            Action::Input(c) => {
                self.input.push(c);
            }
            Action::InputBackspace => {
                self.input.pop();
            }
            Action::Paste(text) => {
                // Copied identifiers often drag a trailing newline along
                self.input
                    .extend(text.trim().chars().filter(|c| !c.is_control()));
            }

            Action::RepositoryLoaded(summary, generation) => {
                self.apply_summary(SummaryState::Loaded(*summary), generation);
            }
            Action::RepositoryFailed(msg, generation) => {
                self.apply_summary(SummaryState::Failed(msg), generation);
            }
            Action::IssuesLoaded(issues, generation) => {
                let applied = self
                    .repository
                    .as_mut()
                    .is_some_and(|view| view.apply_issues(issues, generation));
                if !applied {
                    debug!(generation, "discarding stale issues result");
                }
            }
            Action::IssuesFailed(msg, generation) => {
                if self.is_current(generation) {
                    self.error = Some(msg);
                } else {
                    debug!(generation, "discarding stale issues failure");
                }
            }

            Action::Refresh => {
                if let Some(identifier) = self.repository.as_ref().map(|v| v.identifier.clone()) {
                    self.load_repository(identifier);
                }
            }
            Action::OpenInBrowser => {
                if let Some(url) = self.selected_issue_url() {
                    if let Err(e) = open_in_browser(&url) {
                        self.error = Some(e.to_string());
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.selected_issue_url() {
                    if let Err(e) = copy_to_clipboard(&url) {
                        self.error = Some(e.to_string());
                    }
                }
            }

            Action::None => {}
        }
    }

    fn navigate(&mut self, location: Location) {
        if self.navigator.navigate(location) {
            debug!(path = self.navigator.location().path(), "navigated");
            self.sync_route();
        }
    }

    /// Bring the screen in line with the current route; a new identifier starts a new load
    fn sync_route(&mut self) {
        let route = self.navigator.route();
        match route.repository_param() {
            None => {
                self.screen = Screen::Dashboard;
                self.repository = None;
            }
            Some(identifier) => {
                self.screen = Screen::Repository;
                let unchanged = self
                    .repository
                    .as_ref()
                    .is_some_and(|view| view.identifier == identifier);
                if !unchanged {
                    self.load_repository(identifier.to_string());
                }
            }
        }
    }

    fn load_repository(&mut self, identifier: String) {
        self.generation += 1;
        let generation = self.generation;
        debug!(%identifier, generation, "loading repository");

        self.remember(&identifier);
        self.repository = Some(RepositoryView::new(identifier.clone(), generation));
        self.spawn_load_summary(identifier.clone(), generation);
        self.spawn_load_issues(identifier, generation);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.repository
            .as_ref()
            .is_some_and(|view| view.is_current(generation))
    }

    fn apply_summary(&mut self, state: SummaryState, generation: u64) {
        let applied = self
            .repository
            .as_mut()
            .is_some_and(|view| view.apply_summary(state, generation));
        if !applied {
            debug!(generation, "discarding stale repository result");
        }
    }

    fn remember(&mut self, identifier: &str) {
        self.recent.retain(|r| r != identifier);
        self.recent.insert(0, identifier.to_string());
        self.recent.truncate(MAX_RECENT);
        self.recent_index = 0;
    }

    fn selected_issue_url(&self) -> Option<String> {
        self.repository
            .as_ref()?
            .selected_issue()
            .map(|issue| issue.html_url.clone())
    }

    fn spawn_load_summary(&self, identifier: String, generation: u64) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            match api.get_repository(&identifier).await {
                Ok(summary) => {
                    tx.send(Action::RepositoryLoaded(Box::new(summary), generation))
                        .ok();
                }
                Err(e) => {
                    warn!(%identifier, error = %e, "repository fetch failed");
                    tx.send(Action::RepositoryFailed(e.to_string(), generation))
                        .ok();
                }
            }
        });
    }

    fn spawn_load_issues(&self, identifier: String, generation: u64) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            match api.list_issues(&identifier).await {
                Ok(issues) => {
                    tx.send(Action::IssuesLoaded(issues, generation)).ok();
                }
                Err(e) => {
                    warn!(%identifier, error = %e, "issues fetch failed");
                    tx.send(Action::IssuesFailed(e.to_string(), generation)).ok();
                }
            }
        });
    }
}

fn open_in_browser(url: &str) -> Result<()> {
    open::that(url).map_err(|e| ExplorerError::Browser(e.to_string()))
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ExplorerError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| ExplorerError::Clipboard(e.to_string()))
}
