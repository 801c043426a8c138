// Tab bar rendering.
// Marks the active tab and shows a spinner on feeds with a fetch in flight.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::cache::KeyValueStore;
use crate::flickr::PhotoSource;

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs<P, S>(frame: &mut Frame, app: &App<P, S>, area: Rect)
where
    P: PhotoSource + Clone + Send + Sync + 'static,
    S: KeyValueStore,
{
    let tab_titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let state = app.feed(*tab);
            let title = if state.in_flight() {
                format!("{} ⏳", tab.title())
            } else if state.notice.is_some() {
                format!("{} !", tab.title())
            } else {
                tab.title().to_string()
            };

            let style = if *tab == app.active_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if state.notice.is_some() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(Span::styled(title, style))
        })
        .collect();

    let selected_index = Tab::ALL
        .iter()
        .position(|t| *t == app.active_tab)
        .unwrap_or(0);

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" shutter ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
