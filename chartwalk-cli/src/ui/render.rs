//! Frame rendering.
//!
//! Everything here is a pure function of the session: page bounds are
//! re-derived from the cursor on every frame.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use chartwalk_core::model::{PackageVersion, display_name};
use chartwalk_core::page::PAGE_SIZE;
use chartwalk_core::state::{Screen, Session};

use super::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const TITLE: &str = " 🚀 Helm Chart Browser ";

pub fn draw(f: &mut Frame, session: &Session, tick: usize, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(f.area());

    let body = Paragraph::new(body_lines(session, tick, theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(Span::styled(TITLE, theme.title_style())),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[0]);

    let help = Paragraph::new(help_lines(session, theme))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(theme.border_style()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(help, chunks[1]);
}

/// Main panel contents for the current screen.
pub fn body_lines(session: &Session, tick: usize, theme: &Theme) -> Vec<Line<'static>> {
    let spinner = SPINNER[tick % SPINNER.len()];
    let loading = |what: &str| {
        vec![Line::from(Span::styled(
            format!("{} {}", spinner, what),
            theme.text_dim_style(),
        ))]
    };

    match &session.screen {
        Screen::RefreshingIndex => loading("Updating Helm repositories..."),
        Screen::RepositoryList if session.loading => loading("Loading repositories..."),
        Screen::PackageList if session.loading => loading("Loading charts..."),
        Screen::VersionList if session.loading => loading("Loading versions..."),
        Screen::Fetching => loading(&fetching_label(session)),
        Screen::RepositoryList | Screen::PackageList | Screen::VersionList => {
            list_screen(session, theme)
        }
        Screen::Complete { .. } => vec![
            Line::from(Span::styled(
                format!("✅ {}", session.message().unwrap_or_default()),
                theme.success_style(),
            )),
            Line::default(),
            Line::from(Span::styled("🎉 Press any key to exit...", theme.text_style())),
        ],
        Screen::Failed { error } => {
            let mut lines: Vec<Line<'static>> = error
                .lines()
                .enumerate()
                .map(|(i, text)| {
                    let text = if i == 0 {
                        format!("❌ Error: {}", text)
                    } else {
                        format!("   {}", text)
                    };
                    Line::from(Span::styled(text, theme.error_style()))
                })
                .collect();
            if lines.is_empty() {
                lines.push(Line::from(Span::styled("❌ Error", theme.error_style())));
            }
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Press any key to quit.",
                theme.text_style(),
            )));
            lines
        }
    }
}

fn list_screen(session: &Session, theme: &Theme) -> Vec<Line<'static>> {
    let (heading, noun) = match session.screen {
        Screen::RepositoryList => ("🚀 Select a Helm repository:".to_string(), "repositories"),
        Screen::PackageList => (
            format!("📊 Charts in repository '{}':", repository_name(session)),
            "charts",
        ),
        _ => (
            format!("📦 Versions of chart '{}':", package_display_name(session)),
            "versions",
        ),
    };

    let mut lines = vec![
        Line::from(Span::styled(heading, theme.heading_style())),
        Line::default(),
    ];

    if session.page().is_empty() {
        lines.push(Line::from(Span::styled(
            format!("No {} found", noun),
            theme.text_muted_style(),
        )));
        return lines;
    }

    let header = match session.screen {
        Screen::RepositoryList => format!("{:<4} {:<20} {}", "", "REPOSITORY", "URL"),
        Screen::PackageList => format!("{:<4} {:<30} {}", "", "CHART NAME", "VERSION"),
        _ => format!("{:<4} {:<15} {:<15}", "", "CHART VERSION", "APP VERSION"),
    };
    lines.push(Line::from(Span::styled(
        format!("  {}", header),
        theme.column_header_style(),
    )));
    lines.extend(list_rows(session, theme));
    lines.push(Line::default());

    if let Some(summary) = pagination_summary(session, noun) {
        lines.push(Line::from(Span::styled(summary, theme.text_dim_style())));
    }
    lines
}

/// Rows of the active list that fall on the cursor's page.
pub fn list_rows(session: &Session, theme: &Theme) -> Vec<Line<'static>> {
    let page = session.page();
    (page.start..page.end)
        .map(|i| {
            let number = format!("{:<4}", format!("{}.", i + 1));
            let mut spans = match session.screen {
                Screen::RepositoryList => {
                    let repo = &session.repositories[i];
                    vec![
                        Span::styled(format!("{:<20}", repo.name), theme.primary_style()),
                        Span::raw(" "),
                        Span::styled(repo.url.clone(), theme.secondary_style()),
                    ]
                }
                Screen::PackageList => {
                    let package = &session.packages[i];
                    let name = display_name(&package.qualified_name, repository_name(session));
                    vec![
                        Span::styled(format!("{:<30}", name), theme.primary_style()),
                        Span::raw(" "),
                        Span::styled(format!("v{}", package.version), theme.secondary_style()),
                    ]
                }
                _ => version_spans(&session.versions[i], i, theme),
            };

            let marker = if i == session.cursor { "► " } else { "  " };
            spans.insert(0, Span::raw(format!("{}{} ", marker, number)));

            let line = Line::from(spans);
            if i == session.cursor {
                line.style(theme.selection_style())
            } else {
                line
            }
        })
        .collect()
}

fn version_spans(version: &PackageVersion, index: usize, theme: &Theme) -> Vec<Span<'static>> {
    let app_version = if version.app_version.is_empty() {
        Span::styled(format!("{:<15}", "─"), theme.text_muted_style())
    } else {
        Span::styled(
            format!("{:<15}", version.app_version),
            theme.secondary_style(),
        )
    };
    let mut spans = vec![
        Span::styled(format!("{:<15}", version.version), theme.primary_style()),
        Span::raw(" "),
        app_version,
    ];
    // Position, not version ordering, decides "latest".
    if PackageVersion::is_latest(index) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("🏷️  LATEST", theme.badge_style()));
    }
    spans
}

/// One-line page summary, or nothing for lists of at most one item.
pub fn pagination_summary(session: &Session, noun: &str) -> Option<String> {
    let len = session.active_len();
    if len > PAGE_SIZE {
        let page = session.page();
        Some(format!(
            "📄 Page {} of {} • {} total {}",
            page.index + 1,
            page.count,
            len,
            noun
        ))
    } else if len > 1 {
        Some(format!("📄 {} {} available", len, noun))
    } else {
        None
    }
}

/// Key bindings available on the current screen.
pub fn help_lines(session: &Session, theme: &Theme) -> Vec<Line<'static>> {
    let mut hints: Vec<(&str, &str)> = Vec::new();
    match session.screen {
        Screen::RepositoryList | Screen::PackageList | Screen::VersionList
            if !session.loading =>
        {
            hints.push(("↑/↓ j/k", "navigate"));
            hints.push(("Enter/Space", "select"));
            hints.push(("1-9,0", "pick on page"));
            if session.screen != Screen::RepositoryList {
                hints.push(("Backspace/Esc", "back"));
            }
            hints.push(("q/Ctrl+C", "quit"));
        }
        Screen::Complete { .. } | Screen::Failed { .. } => hints.push(("any key", "exit")),
        // Nothing but quit is accepted while a fetch is in flight.
        _ => hints.push(("q/Ctrl+C", "quit")),
    }

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", theme.text_muted_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.key_hint_style()));
        spans.push(Span::styled(format!(" {}", action), theme.text_dim_style()));
    }
    vec![Line::from(spans)]
}

fn fetching_label(session: &Session) -> String {
    match session.selected_version() {
        Some(v) => format!(
            "Downloading values.yaml for {} {}...",
            display_name(&v.qualified_name, repository_name(session)),
            v.version
        ),
        None => "Downloading values.yaml...".to_string(),
    }
}

fn repository_name(session: &Session) -> &str {
    session
        .selected_repository()
        .map(|r| r.name.as_str())
        .unwrap_or_default()
}

fn package_display_name(session: &Session) -> &str {
    session
        .selected_package()
        .map(|p| display_name(&p.qualified_name, repository_name(session)))
        .unwrap_or_default()
}
