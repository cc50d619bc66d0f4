use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::{pad_to_width, truncate};
use crate::app::App;
use crate::types::RepositorySummary;
use crate::view::{RepositoryView, SummaryState};

const SUMMARY_HEIGHT: u16 = 8;
const FAILED_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.repository else {
        return;
    };

    // Unloaded summary takes no space at all
    let summary_height = match view.summary {
        SummaryState::Unloaded => 0,
        SummaryState::Loaded(_) => SUMMARY_HEIGHT,
        SummaryState::Failed(_) => FAILED_HEIGHT,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(summary_height), Constraint::Min(0)])
        .split(area);

    if let Some(summary) = view.summary.loaded() {
        render_summary(frame, summary, chunks[0]);
    } else if let SummaryState::Failed(msg) = &view.summary {
        render_failed(frame, &view.identifier, msg, chunks[0]);
    }

    render_issues(frame, view, chunks[1]);
}

fn render_summary(frame: &mut Frame, summary: &RepositorySummary, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Repository ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Counters own the last row so a long description can only lose its own tail
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let heading = vec![
        Line::from(vec![
            Span::styled(
                format!("@{}", summary.owner.login),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(
                summary.owner.avatar_url.as_str(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            summary.full_name.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), rows[0]);

    let description = Paragraph::new(summary.description.as_str()).wrap(Wrap { trim: true });
    frame.render_widget(description, rows[1]);

    let counter = |value: u64, label: &'static str| {
        vec![
            Span::styled(
                value.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", label), Style::default().fg(Color::Gray)),
        ]
    };

    let mut counters = counter(summary.stargazers_count, "Stars");
    counters.push(Span::raw("   "));
    counters.extend(counter(summary.forks_count, "Forks"));
    counters.push(Span::raw("   "));
    counters.extend(counter(summary.open_issues_count, "Open issues"));
    frame.render_widget(Paragraph::new(Line::from(counters)), rows[2]);
}

fn render_failed(frame: &mut Frame, identifier: &str, msg: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", identifier))
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(format!("Could not load repository: {}", msg))
        .block(block)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(paragraph, area);
}

fn render_issues(frame: &mut Frame, view: &RepositoryView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Issues ({}) ", view.issues.len()));

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 4; // space(1) + chevron(1) + highlight padding(2), all in columns
    let flex = w.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = view
        .issues
        .iter()
        .enumerate()
        .map(|(i, issue)| {
            let style = if i == view.issue_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let title = pad_to_width(&truncate(&issue.title, flex), flex);

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(title, style),
                    Span::raw(" "),
                    Span::styled(">", Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(Span::styled(
                    issue.user.login.as_str(),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !view.issues.is_empty() {
        state.select(Some(view.issue_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use crate::action::Action;
    use crate::app::tests::{issue, stub_with};
    use crate::app::App;
    use crate::route::Location;
    use crate::types::{Issue, IssueAuthor, Owner, RepositorySummary};
    use crate::ui::tests::{buffer_text, draw};
    use crate::ui::{BACK_LINK, LOGO};

    fn react() -> RepositorySummary {
        RepositorySummary {
            full_name: "facebook/react".to_string(),
            description: "A library for web and native user interfaces.".to_string(),
            stargazers_count: 150000,
            forks_count: 30000,
            open_issues_count: 500,
            owner: Owner {
                login: "facebook".to_string(),
                avatar_url: "https://avatars.example/u/69631".to_string(),
            },
        }
    }

    fn app_for(identifier: &str) -> (App, u64) {
        let (tx, _rx) = mpsc::unbounded_channel();
        let app = App::new(
            Arc::new(stub_with(&[])),
            Location::repository(identifier),
            tx,
        );
        let generation = app.repository.as_ref().unwrap().generation;
        (app, generation)
    }

    #[tokio::test]
    async fn initial_frame_has_header_and_empty_issues() {
        let (app, _) = app_for("facebook/react");
        let text = buffer_text(&draw(&app, 100, 30));

        assert!(text.contains(LOGO));
        assert!(text.contains(BACK_LINK));
        assert!(text.contains("Issues (0)"));
        assert!(!text.contains("Stars"));
        assert!(!text.contains("Repository"));
    }

    #[tokio::test]
    async fn summary_block_shows_loaded_fields() {
        let (mut app, generation) = app_for("facebook/react");
        app.update(Action::RepositoryLoaded(Box::new(react()), generation));
        let text = buffer_text(&draw(&app, 100, 30));

        assert!(text.contains("facebook/react"));
        assert!(text.contains("A library for web and native user interfaces."));
        assert!(text.contains("@facebook"));
        assert!(text.contains("https://avatars.example/u/69631"));
        assert!(text.contains("150000 Stars"));
        assert!(text.contains("30000 Forks"));
        assert!(text.contains("500 Open issues"));
    }

    #[tokio::test]
    async fn issue_rows_follow_list_order() {
        let (mut app, generation) = app_for("facebook/react");
        let issues = vec![
            issue(3, "Crash on mount", "carol"),
            issue(1, "Bug X", "alice"),
            issue(2, "Docs typo", "bob"),
        ];
        app.update(Action::IssuesLoaded(issues, generation));
        let text = buffer_text(&draw(&app, 100, 30));

        assert!(text.contains("Issues (3)"));
        let positions: Vec<usize> = ["Crash on mount", "Bug X", "Docs typo"]
            .iter()
            .map(|title| text.find(title).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for login in ["carol", "alice", "bob"] {
            assert!(text.contains(login));
        }
        assert_eq!(text.matches(" >").count(), 3);
    }

    #[tokio::test]
    async fn single_issue_scenario() {
        let (mut app, generation) = app_for("facebook/react");
        let bug = Issue {
            id: 1,
            title: "Bug X".to_string(),
            html_url: "https://github.com/facebook/react/issues/1".to_string(),
            user: IssueAuthor {
                login: "alice".to_string(),
            },
        };
        app.update(Action::IssuesLoaded(vec![bug], generation));
        let text = buffer_text(&draw(&app, 100, 30));

        assert!(text.contains("Bug X"));
        assert!(text.contains("alice"));
        let view = app.repository.as_ref().unwrap();
        assert_eq!(
            view.selected_issue().unwrap().html_url,
            "https://github.com/facebook/react/issues/1"
        );
    }

    #[tokio::test]
    async fn empty_issue_list_renders_no_rows() {
        let (mut app, generation) = app_for("octo/quiet");
        app.update(Action::IssuesLoaded(vec![], generation));
        let text = buffer_text(&draw(&app, 100, 30));

        assert!(text.contains("Issues (0)"));
        assert!(!text.contains(" >"));
        assert!(!text.contains("Error"));
    }

    #[tokio::test]
    async fn failed_summary_is_shown_in_place_of_block() {
        let (mut app, generation) = app_for("nobody/nothing");
        app.update(Action::RepositoryFailed(
            "API error (404): Not Found".to_string(),
            generation,
        ));
        let text = buffer_text(&draw(&app, 100, 30));

        assert!(text.contains("Could not load repository: API error (404): Not Found"));
        assert!(!text.contains("Stars"));
    }

    #[tokio::test]
    async fn long_description_keeps_counters_visible() {
        let (mut app, generation) = app_for("octo/long");
        let mut summary = react();
        summary.full_name = "octo/long".to_string();
        summary.description = "word ".repeat(60);
        app.update(Action::RepositoryLoaded(Box::new(summary), generation));
        let text = buffer_text(&draw(&app, 80, 24));

        assert!(text.contains("octo/long"));
        assert!(text.contains("word word"));
        assert!(text.contains("150000 Stars"));
        assert!(text.contains("30000 Forks"));
        assert!(text.contains("500 Open issues"));
    }

    #[tokio::test]
    async fn wide_titles_keep_chevron_in_column() {
        let (mut app, generation) = app_for("octo/wide");
        let issues = vec![
            issue(1, "plain ascii title", "alice"),
            issue(2, &"漢字".repeat(40), "bob"),
            issue(3, "emoji 🚀🚀 title", "carol"),
        ];
        app.update(Action::IssuesLoaded(issues, generation));
        let buffer = draw(&app, 60, 24);

        let width = buffer.area.width as usize;
        let columns: Vec<usize> = buffer
            .content
            .chunks(width)
            .filter_map(|row| row.iter().position(|cell| cell.symbol() == ">"))
            .collect();

        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|&c| c == columns[0]));
        assert!(columns[0] < width - 1);
    }

    #[tokio::test]
    async fn rendering_is_idempotent() {
        let (mut app, generation) = app_for("facebook/react");
        app.update(Action::RepositoryLoaded(Box::new(react()), generation));
        app.update(Action::IssuesLoaded(vec![issue(1, "Bug X", "alice")], generation));

        let first = draw(&app, 80, 24);
        let second = draw(&app, 80, 24);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn long_titles_are_truncated() {
        let (mut app, generation) = app_for("facebook/react");
        let title = "x".repeat(200);
        app.update(Action::IssuesLoaded(vec![issue(1, &title, "alice")], generation));
        let text = buffer_text(&draw(&app, 60, 20));

        assert!(text.contains("..."));
        assert!(!text.contains(&title));
    }
}
