// Photo grid rendering.
// Lays descriptors out in rows of cells with loading and empty states.

use ratatui::{prelude::*, widgets::*};

use crate::flickr::ImageDescriptor;
use crate::state::{FeedState, PhotoGrid};

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

fn photo_cell(image: &ImageDescriptor, selected: bool) -> Cell<'_> {
    let id_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Cell::from(Text::from(vec![
        Line::from(Span::styled(format!("▣ {}", image.id), id_style)),
        Line::from(Span::styled(
            image.url.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
}

/// Render a feed's photos as a grid.
pub fn render_photo_grid(
    frame: &mut Frame,
    state: &FeedState,
    grid: &mut PhotoGrid,
    title: &str,
    empty_message: &str,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));

    if state.items.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if state.loading || state.refreshing {
            render_loading(frame, inner, "Loading photos");
        } else {
            render_empty(frame, inner, empty_message);
        }
        return;
    }

    let columns = grid.columns;
    let selected = grid.selected();
    let rows: Vec<Row> = state
        .items
        .chunks(columns)
        .enumerate()
        .map(|(row, images)| {
            let cells = images.iter().enumerate().map(|(col, image)| {
                photo_cell(image, selected == Some(row * columns + col))
            });
            Row::new(cells).height(2).bottom_margin(1)
        })
        .collect();

    let widths = vec![Constraint::Ratio(1, columns as u32); columns];
    let footer = if state.loading_more {
        " ⏳ Loading more... ".to_string()
    } else if state.has_more {
        String::new()
    } else {
        " end of results ".to_string()
    };

    let table = Table::new(rows, widths)
        .block(block.title_bottom(Line::from(footer).right_aligned()))
        .column_spacing(2)
        .row_highlight_style(Style::default().bg(Color::Black));

    frame.render_stateful_widget(table, area, &mut grid.table_state);
}
