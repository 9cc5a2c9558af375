//! Panel State
//!
//! The panel shows one of two lists: all batch changes, or the changesets
//! of the batch change the user drilled into. Each list has its own
//! [`FetchState`]; the two are fully independent.

use sg_client::{BatchChange, Changeset};

use crate::fetch::FetchState;

/// What the changeset screen needs to know about its batch change: the
/// lookup key (namespace id + name), the id the refresh scheduler matches
/// on, and display/URL context.
#[derive(Debug, Clone)]
pub struct BatchChangeRef {
    pub id: String,
    pub namespace_id: String,
    pub name: String,
    /// `{namespace} / {name}`, as shown in the list
    pub title: String,
    /// URL path of the batch change relative to the instance root
    pub url: String,
}

impl BatchChangeRef {
    pub fn of(batch_change: &BatchChange) -> Self {
        Self {
            id: batch_change.id.clone(),
            namespace_id: batch_change.namespace.id.clone(),
            name: batch_change.name.clone(),
            title: format!(
                "{} / {}",
                batch_change.namespace.namespace_name, batch_change.name
            ),
            url: batch_change.url.clone(),
        }
    }
}

/// Which list is currently on screen.
#[derive(Debug, Clone)]
pub enum Screen {
    BatchChanges,
    Changesets(BatchChangeRef),
}

/// State of the two-level list panel.
#[derive(Debug)]
pub struct PanelState {
    pub screen: Screen,
    pub batch_changes: FetchState<BatchChange>,
    pub changesets: FetchState<Changeset>,
    /// Cursor into the visible rows of the batch change list
    pub selected_batch_change: usize,
    /// Cursor into the visible rows of the changeset list
    pub selected_changeset: usize,
    /// Committed text filter over the visible rows; empty means none
    pub filter: String,
    /// Whether the filter line is capturing keystrokes
    pub filter_input: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            screen: Screen::BatchChanges,
            batch_changes: FetchState::default(),
            changesets: FetchState::default(),
            selected_batch_change: 0,
            selected_changeset: 0,
            filter: String::new(),
            filter_input: false,
        }
    }
}

impl PanelState {
    /// Cursor position on the current screen.
    pub fn cursor(&self) -> usize {
        match self.screen {
            Screen::BatchChanges => self.selected_batch_change,
            Screen::Changesets(_) => self.selected_changeset,
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::BatchChanges => &mut self.selected_batch_change,
            Screen::Changesets(_) => &mut self.selected_changeset,
        }
    }

    /// Move the cursor down within `row_count` visible rows.
    pub fn cursor_down(&mut self, row_count: usize) {
        let cursor = self.cursor_mut();
        if *cursor + 1 < row_count {
            *cursor += 1;
        }
    }

    /// Move the cursor up.
    pub fn cursor_up(&mut self) {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    /// Jump to the first row.
    pub fn cursor_top(&mut self) {
        *self.cursor_mut() = 0;
    }

    /// Jump to the last of `row_count` visible rows.
    pub fn cursor_bottom(&mut self, row_count: usize) {
        *self.cursor_mut() = row_count.saturating_sub(1);
    }

    /// Pull the cursor back inside the visible rows after they changed.
    pub fn clamp_cursor(&mut self, row_count: usize) {
        let cursor = self.cursor_mut();
        if *cursor >= row_count {
            *cursor = row_count.saturating_sub(1);
        }
    }

    /// Switch to the changeset screen of one batch change. The filter is
    /// per screen, so it resets.
    pub fn enter_changesets(&mut self, batch_change: BatchChangeRef) {
        self.screen = Screen::Changesets(batch_change);
        self.selected_changeset = 0;
        self.filter.clear();
        self.filter_input = false;
    }

    /// Return to the batch change list, cancelling whatever the changeset
    /// screen still had in flight.
    pub fn leave_changesets(&mut self) {
        self.changesets.teardown();
        self.screen = Screen::BatchChanges;
        self.filter.clear();
        self.filter_input = false;
    }

    /// Whether the changeset screen of this batch change is on display.
    pub fn is_viewing(&self, batch_change_id: &str) -> bool {
        matches!(&self.screen, Screen::Changesets(ctx) if ctx.id == batch_change_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_within_rows() {
        let mut panel = PanelState::default();
        panel.cursor_down(3);
        panel.cursor_down(3);
        panel.cursor_down(3);
        assert_eq!(panel.cursor(), 2);

        panel.cursor_up();
        assert_eq!(panel.cursor(), 1);

        panel.cursor_bottom(3);
        assert_eq!(panel.cursor(), 2);
        panel.cursor_top();
        assert_eq!(panel.cursor(), 0);
    }

    #[test]
    fn test_clamp_cursor_after_rows_shrank() {
        let mut panel = PanelState::default();
        panel.cursor_down(10);
        panel.cursor_down(10);
        panel.clamp_cursor(1);
        assert_eq!(panel.cursor(), 0);

        panel.clamp_cursor(0);
        assert_eq!(panel.cursor(), 0);
    }

    #[test]
    fn test_enter_and_leave_changesets_reset_filter() {
        let mut panel = PanelState::default();
        panel.filter = "ci".to_string();

        let batch_change = BatchChangeRef {
            id: "bc-1".to_string(),
            namespace_id: "ns-1".to_string(),
            name: "update-ci".to_string(),
            title: "alice / update-ci".to_string(),
            url: "/users/alice/batch-changes/update-ci".to_string(),
        };
        panel.enter_changesets(batch_change);
        assert!(panel.filter.is_empty());
        assert!(panel.is_viewing("bc-1"));
        assert!(!panel.is_viewing("bc-2"));

        let epoch_before = panel.changesets.epoch();
        panel.leave_changesets();
        assert!(matches!(panel.screen, Screen::BatchChanges));
        // Teardown supersedes any in-flight changeset load.
        assert!(panel.changesets.epoch() > epoch_before);
    }
}
