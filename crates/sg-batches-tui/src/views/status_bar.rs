//! Status Bar Widget
//!
//! Renders the latest status message at the bottom of the screen.
//! Format: `[timestamp] emoji message`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::state::{StatusKind, StatusMessage};

/// Widget for rendering the status bar
pub struct StatusBarWidget<'a>(pub Option<&'a StatusMessage>);

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        // Fill entire row with background
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_bg(Color::Black).set_char(' ');
        }

        let Some(message) = self.0 else {
            return;
        };

        let metadata_style = Style::default().fg(Color::DarkGray).bg(Color::Black);
        let message_style = Style::default().fg(message_color(message.kind)).bg(Color::Black);

        let mut x = area.x + 1; // 1 char padding

        let ts_str = format!("[{}] ", message.timestamp.format("%H:%M:%S"));
        buf.set_string(x, area.y, &ts_str, metadata_style);
        x += ts_str.len() as u16;

        let emoji_str = format!("{} ", message.kind.emoji());
        buf.set_string(x, area.y, &emoji_str, message_style);
        x += 3; // emoji + space (emoji typically renders as 2 cells)

        // Message (truncate if needed)
        let available_width = area.width.saturating_sub(x - area.x + 1);
        if message.message.chars().count() > available_width as usize {
            let truncate_at = available_width.saturating_sub(1) as usize;
            let truncated: String = message.message.chars().take(truncate_at).collect();
            let display = format!("{}…", truncated);
            buf.set_string(x, area.y, &display, message_style);
        } else {
            buf.set_string(x, area.y, &message.message, message_style);
        }
    }
}

fn message_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Running => Color::Yellow,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
        StatusKind::Info => Color::Gray,
    }
}
