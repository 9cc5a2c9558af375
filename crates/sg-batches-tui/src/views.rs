use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub mod error_view;
pub mod list_view;
pub mod status_bar;

/// Render the entire application UI
pub fn render(state: &AppState, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // List panel
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    list_view::render(state, chunks[0], f);
    f.render_widget(
        status_bar::StatusBarWidget(state.notifier.status_bar.latest()),
        chunks[1],
    );

    // Error overlay on top of everything
    if state.error_overlay {
        error_view::render(state, f.area(), f);
    }
}
