// UI module for rendering the TUI.
// Contains widgets for tabs, the search bar, photo grids and overlays.

mod grid;
mod notice;
mod tabs;

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, InputMode, Tab};
use crate::cache::KeyValueStore;
use crate::flickr::PhotoSource;
use crate::state::{FeedState, PagedFeed};

/// Main draw function that renders the entire UI.
pub fn draw<P, S>(frame: &mut Frame, app: &mut App<P, S>)
where
    P: PhotoSource + Clone + Send + Sync + 'static,
    S: KeyValueStore,
{
    let search_height = if app.active_tab == Tab::Search { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Tab bar
            Constraint::Length(search_height), // Search box
            Constraint::Min(1),                // Photo grid
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    if app.active_tab == Tab::Search {
        draw_search_bar(frame, app, chunks[1]);
    }

    match app.active_tab {
        Tab::Recent => grid::render_photo_grid(
            frame,
            app.recent.state(),
            &mut app.recent_grid,
            "Recent photos",
            "No images found",
            chunks[2],
        ),
        Tab::Search => {
            let title = match app.search.query() {
                Some(query) => format!("Results for \"{}\"", query),
                None => "Search".to_string(),
            };
            let empty = if app.search.query().is_some() {
                "No images found"
            } else {
                "Press / to search"
            };
            grid::render_photo_grid(
                frame,
                app.search.state(),
                &mut app.search_grid,
                &title,
                empty,
                chunks[2],
            );
        }
    }

    if let Some(notice) = &app.feed(app.active_tab).notice {
        notice::draw_notice(frame, notice, chunks[2]);
    }

    draw_status_bar(frame, app, chunks[3]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the search input box.
fn draw_search_bar<P, S>(frame: &mut Frame, app: &App<P, S>, area: Rect)
where
    P: PhotoSource + Clone + Send + Sync + 'static,
    S: KeyValueStore,
{
    let editing = app.input_mode == InputMode::Editing;
    let border = if editing { Color::Cyan } else { Color::DarkGray };

    let mut spans = vec![
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.search_input.as_str()),
    ];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(widget, area);
}

/// Format a timestamp as relative time (e.g., "2h ago").
fn format_relative_time(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Short status text for a feed.
fn feed_status(state: &FeedState) -> String {
    if state.loading {
        "Loading...".to_string()
    } else if state.refreshing {
        "Refreshing...".to_string()
    } else if state.loading_more {
        "Loading more...".to_string()
    } else {
        let pages = state.page.saturating_sub(1);
        let suffix = if state.has_more { "" } else { " (end)" };
        let updated = state
            .updated_at
            .map(|at| format!(", updated {}", format_relative_time(&at, Utc::now())))
            .unwrap_or_default();
        format!(
            "{} photos, {} pages{}{}",
            state.items.len(),
            pages,
            suffix,
            updated
        )
    }
}

/// Draw the bottom status bar.
fn draw_status_bar<P, S>(frame: &mut Frame, app: &App<P, S>, area: Rect)
where
    P: PhotoSource + Clone + Send + Sync + 'static,
    S: KeyValueStore,
{
    let tab = app.active_tab;
    let state = app.feed(tab);
    let selected_url = match tab {
        Tab::Recent => app.recent_grid.selected(),
        Tab::Search => app.search_grid.selected(),
    }
    .and_then(|i| state.items.get(i))
    .map(|image| image.url.as_str())
    .unwrap_or("");

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", feed_status(state)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(selected_url, Style::default().fg(Color::DarkGray)),
        Span::styled("  ? help  q quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the key binding reference.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let width = area.width.min(44);
    let height = area.height.min(14);
    let help_area = Rect::new(
        (area.width.saturating_sub(width)) / 2,
        (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let bindings = [
        ("Tab / S-Tab", "Switch feed"),
        ("←↑↓→ / hjkl", "Move selection"),
        ("r", "Refresh"),
        ("R", "Retry after failure"),
        ("x", "Dismiss notice"),
        ("/", "Edit search query"),
        ("Enter", "Submit search"),
        ("Esc", "Stop editing / close help"),
        ("q", "Quit"),
    ];

    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<13}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    frame.render_widget(Clear, help_area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help "),
        ),
        help_area,
    );
}
