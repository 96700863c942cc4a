// Confirmation dialog shown before a branch workflow runs.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use crate::ui::popup_upper;

pub fn render_confirm(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let width = 64_u16.min(area.width);
    let popup = popup_upper(area, width, 6);

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(Color::Red));

    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let msg_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), msg_area);

    let line = Line::from(vec![
        Span::styled("[y/Enter]", Style::default().fg(Color::Green).bold()),
        Span::raw(" Run  "),
        Span::styled("[n/Esc]", Style::default().fg(Color::Red).bold()),
        Span::raw(" Cancel"),
    ]);
    let bar = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1);
    frame.render_widget(Paragraph::new(line), bar);
}
