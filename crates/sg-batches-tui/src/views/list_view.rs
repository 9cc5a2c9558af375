//! List panel
//!
//! Renders the active screen (batch changes or changesets) as a table:
//! icon, title, subtitle, and an optional right-aligned counts column.
//! The block title carries the screen name and item count, the bottom
//! border the filter line or key hints.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::state::{AppState, Screen};
use crate::view_models::{count_label, visible_rows, ListRow};

/// Render the list panel for the active screen
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let panel = &state.panel;
    let rows = visible_rows(state);

    let (title, is_loading, total) = match &panel.screen {
        Screen::BatchChanges => (
            "Batch Changes".to_string(),
            panel.batch_changes.is_loading(),
            panel.batch_changes.items().len(),
        ),
        Screen::Changesets(parent) => (
            parent.title.clone(),
            panel.changesets.is_loading(),
            panel.changesets.items().len(),
        ),
    };

    let status_line = if is_loading {
        Line::from("Loading… ")
            .style(Style::default().fg(Color::Yellow))
            .right_aligned()
    } else {
        Line::from("[r to refresh] ")
            .style(Style::default().fg(Color::DarkGray))
            .right_aligned()
    };

    let block = Block::bordered()
        .title(format!(" {} ({}) ", title, count_label(total)))
        .title(status_line)
        .title_bottom(bottom_line(state));

    if rows.is_empty() {
        let message = empty_message(state, is_loading);
        let paragraph = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let table_rows: Vec<Row> = rows.iter().map(table_row).collect();
    let widths = [
        Constraint::Length(2),      // Icon
        Constraint::Percentage(45), // Title
        Constraint::Percentage(40), // Subtitle
        Constraint::Length(14),     // Counts accessory
    ];

    let table = Table::new(table_rows, widths)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut table_state = TableState::default();
    table_state.select(Some(panel.cursor().min(rows.len() - 1)));

    f.render_stateful_widget(table, area, &mut table_state);
}

fn table_row(row: &ListRow) -> Row<'_> {
    let accessory = row.accessory.clone().unwrap_or_default();
    Row::new(vec![
        Cell::from(row.icon.glyph()).style(Style::default().fg(row.tint.color())),
        Cell::from(row.title.clone()),
        Cell::from(row.subtitle.clone()).style(Style::default().fg(Color::Gray)),
        Cell::from(Line::from(accessory).right_aligned()).style(Style::default().fg(Color::Gray)),
    ])
    .height(1)
}

/// Filter line while filtering, key hints otherwise.
fn bottom_line(state: &AppState) -> Line<'static> {
    let panel = &state.panel;
    if panel.filter_input {
        return Line::from(vec![
            Span::styled(" /", Style::default().fg(Color::Yellow)),
            Span::raw(panel.filter.clone()),
            Span::styled("▌ ", Style::default().fg(Color::Yellow)),
        ]);
    }
    if !panel.filter.is_empty() {
        return Line::from(vec![
            Span::styled(" /", Style::default().fg(Color::Yellow)),
            Span::raw(panel.filter.clone()),
            Span::styled(" [Esc clears] ", Style::default().fg(Color::DarkGray)),
        ]);
    }

    let hints = match panel.screen {
        Screen::BatchChanges => " Enter changesets  o browser  / filter  q quit ",
        Screen::Changesets(_) => " Enter open  p publish/retry  / filter  Esc back ",
    };
    Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
}

fn empty_message(state: &AppState, is_loading: bool) -> String {
    if is_loading {
        return "Loading…".to_string();
    }
    if !state.panel.filter.is_empty() {
        return format!("No matches for \"{}\"", state.panel.filter);
    }
    match state.panel.screen {
        Screen::BatchChanges => "No batch changes".to_string(),
        Screen::Changesets(_) => "No changesets".to_string(),
    }
}
