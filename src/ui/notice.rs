// Notice overlay.
// Snackbar-style failure message anchored to the bottom of the content area.

use ratatui::{prelude::*, widgets::*};

use crate::state::Notice;

/// Draw a notice over the bottom of `area`.
pub fn draw_notice(frame: &mut Frame, notice: &Notice, area: Rect) {
    let width = area.width.min(70);
    let height = 3;
    if area.height < height {
        return;
    }
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height - height;
    let notice_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, notice_area);

    let mut spans = vec![Span::styled(
        notice.message.as_str(),
        Style::default().fg(Color::White),
    )];
    if notice.retry {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("R", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(" Retry", Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled("x", Style::default().fg(Color::Yellow)));
    spans.push(Span::styled(" Dismiss", Style::default().fg(Color::DarkGray)));

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(widget, notice_area);
}
