//! Application orchestration
//!
//! Owns the state and the remote handle, turns key presses into state
//! changes and background work, and applies completion events between
//! frames. All state mutation happens here, on the main thread.

use std::sync::mpsc::Receiver;

use ratatui::crossterm::event::{KeyCode, KeyEvent};

use crate::events::AppEvent;
use crate::notifier::{report_fetch_outcome, Notifier};
use crate::remote::{PublishIntent, PublishRequest, RemoteOps};
use crate::state::{AppState, BatchChangeRef, Screen};
use crate::view_models::{visible_rows, ListRow, RowAction};

pub struct App {
    pub state: AppState,
    remote: RemoteOps,
    events: Receiver<AppEvent>,
}

impl App {
    pub fn new(state: AppState, remote: RemoteOps, events: Receiver<AppEvent>) -> Self {
        Self {
            state,
            remote,
            events,
        }
    }

    /// Apply every completion that arrived since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.on_event(event);
        }
    }

    fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::BatchChangesLoaded { epoch, result } => {
                let outcome = self.state.panel.batch_changes.finish(epoch, result);
                report_fetch_outcome(
                    &outcome,
                    "Failed to load batch changes",
                    &mut self.state.notifier,
                );
                self.clamp_cursor();
            }
            AppEvent::ChangesetsLoaded { epoch, result } => {
                let outcome = self.state.panel.changesets.finish(epoch, result);
                report_fetch_outcome(
                    &outcome,
                    "Failed to load changesets",
                    &mut self.state.notifier,
                );
                self.clamp_cursor();
            }
            AppEvent::PublishFinished { request, result } => match result {
                Ok(()) => self
                    .state
                    .notifier
                    .report_success(request.intent.success_title()),
                Err(err) => self
                    .state
                    .notifier
                    .report_error(request.intent.error_title(), &err.to_string()),
            },
            AppEvent::ChangesetRefreshDue { batch_change_id } => {
                // Refresh only the changeset list the publish happened on.
                // If the user navigated away, the refresh is dropped.
                if self.state.panel.is_viewing(&batch_change_id) {
                    self.refresh();
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // The overlay swallows every key until it is closed.
        if self.state.error_overlay {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.state.error_overlay = false;
            }
            return;
        }

        if self.state.panel.filter_input {
            self.handle_filter_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.state.running = false,
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.row_count();
                self.state.panel.cursor_down(count);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.panel.cursor_up(),
            KeyCode::Char('g') => self.state.panel.cursor_top(),
            KeyCode::Char('G') => {
                let count = self.row_count();
                self.state.panel.cursor_bottom(count);
            }
            KeyCode::Char('/') => {
                self.state.panel.filter.clear();
                self.state.panel.filter_input = true;
                self.state.panel.cursor_top();
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('p') => self.publish_selected(),
            KeyCode::Char('o') => self.open_selected(),
            KeyCode::Char('y') => self.show_selected_url(),
            KeyCode::Char('e') => {
                if self.state.notifier.last_error.is_some() {
                    self.state.error_overlay = true;
                }
            }
            KeyCode::Enter => self.activate_selected(),
            KeyCode::Esc => self.on_escape(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.panel.filter.clear();
                self.state.panel.filter_input = false;
                self.clamp_cursor();
            }
            KeyCode::Enter => self.state.panel.filter_input = false,
            KeyCode::Backspace => {
                self.state.panel.filter.pop();
                self.state.panel.cursor_top();
            }
            KeyCode::Char(c) => {
                self.state.panel.filter.push(c);
                self.state.panel.cursor_top();
            }
            _ => {}
        }
    }

    fn on_escape(&mut self) {
        if !self.state.panel.filter.is_empty() {
            self.state.panel.filter.clear();
            self.clamp_cursor();
            return;
        }
        if matches!(self.state.panel.screen, Screen::Changesets(_)) {
            self.state.panel.leave_changesets();
        }
    }

    /// Start loading the batch change list, superseding any running load.
    pub fn load_batch_changes(&mut self) {
        let ticket = self.state.panel.batch_changes.begin_load();
        self.remote.spawn_batch_changes_load(ticket);
    }

    fn load_changesets(&mut self, batch_change: BatchChangeRef) {
        let ticket = self.state.panel.changesets.begin_load();
        self.remote.spawn_changesets_load(ticket, batch_change);
    }

    /// Reload whichever list is on screen.
    pub fn refresh(&mut self) {
        match self.state.panel.screen.clone() {
            Screen::BatchChanges => self.load_batch_changes(),
            Screen::Changesets(parent) => self.load_changesets(parent),
        }
    }

    /// Enter on the batch change list drills into its changesets; on the
    /// changeset list it opens the item in the browser.
    fn activate_selected(&mut self) {
        match self.state.panel.screen {
            Screen::BatchChanges => self.enter_selected_batch_change(),
            Screen::Changesets(_) => self.open_selected(),
        }
    }

    fn enter_selected_batch_change(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let Some(bc) = self
            .state
            .panel
            .batch_changes
            .items()
            .iter()
            .find(|bc| bc.id == row.id)
        else {
            return;
        };

        let batch_change = BatchChangeRef::of(bc);
        self.state.panel.enter_changesets(batch_change.clone());
        self.load_changesets(batch_change);
    }

    fn publish_selected(&mut self) {
        let Screen::Changesets(parent) = self.state.panel.screen.clone() else {
            return;
        };
        let Some(row) = self.selected_row() else {
            return;
        };

        let intent = if row.has_action(RowAction::Retry) {
            PublishIntent::Retry
        } else if row.has_action(RowAction::Publish) {
            PublishIntent::Publish
        } else {
            self.state
                .notifier
                .report_info("Only failed or unpublished changesets can be published");
            return;
        };

        let request = PublishRequest {
            batch_change_id: parent.id,
            changeset_id: row.id,
            repository: row.title,
            intent,
        };
        self.state.notifier.report_running(&request.running_message());
        self.remote.spawn_publish(request);
    }

    fn open_selected(&mut self) {
        if let Some(row) = self.selected_row() {
            self.remote.open_in_browser(row.url);
        }
    }

    fn show_selected_url(&mut self) {
        if let Some(row) = self.selected_row() {
            self.state.notifier.report_info(&row.url);
        }
    }

    fn selected_row(&self) -> Option<ListRow> {
        visible_rows(&self.state)
            .into_iter()
            .nth(self.state.panel.cursor())
    }

    fn row_count(&self) -> usize {
        visible_rows(&self.state).len()
    }

    fn clamp_cursor(&mut self) {
        let count = self.row_count();
        self.state.panel.clamp_cursor(count);
    }
}
