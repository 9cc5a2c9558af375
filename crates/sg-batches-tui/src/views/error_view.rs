//! Error Details Overlay
//!
//! A centered floating popup showing the full text of the last error.
//! The status bar only carries the short form; this view is what the
//! "press e for details" affordance opens.

use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::state::AppState;

/// Render the error overlay as a centered floating window
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let Some(report) = &state.notifier.last_error else {
        return;
    };

    // Dim the screen behind the popup
    let overlay = Block::default().style(
        Style::default()
            .bg(Color::Black)
            .add_modifier(Modifier::DIM),
    );
    f.render_widget(overlay, area);

    let popup_width = (area.width * 60 / 100).clamp(40, 90);
    let popup_height = (area.height * 40 / 100).clamp(7, 16);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    };

    f.render_widget(Clear, popup_area);

    let footer_hint = Line::from(vec![
        Span::styled(" Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" close ", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", report.title))
        .title_bottom(footer_hint)
        .title_alignment(ratatui::layout::Alignment::Center)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

    f.render_widget(block, popup_area);

    let inner = popup_area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });

    let paragraph = Paragraph::new(report.message.clone()).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}
