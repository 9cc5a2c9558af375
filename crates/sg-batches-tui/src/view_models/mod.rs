//! View models for the list panel
//!
//! Pure projections from domain records to display-ready rows. All text,
//! icons and tints are computed here, so views stay dumb and the rules are
//! testable without a terminal.

pub mod batch_change;
pub mod changeset;
pub mod row;

pub use batch_change::batch_change_row;
pub use changeset::changeset_row;
pub use row::{Icon, ListRow, RowAction, Tint};

use chrono::Utc;
use sg_client::PAGE_SIZE;

use crate::state::{AppState, Screen};

/// Rows of the active screen, projected and filtered.
pub fn visible_rows(state: &AppState) -> Vec<ListRow> {
    let now = Utc::now();
    let panel = &state.panel;
    match &panel.screen {
        Screen::BatchChanges => panel
            .batch_changes
            .items()
            .iter()
            .map(|bc| batch_change_row(bc, &state.instance_url, now))
            .filter(|row| row.matches(&panel.filter))
            .collect(),
        Screen::Changesets(parent) => panel
            .changesets
            .items()
            .iter()
            .map(|cs| changeset_row(cs, parent, &state.instance_url))
            .filter(|row| row.matches(&panel.filter))
            .collect(),
    }
}

/// Joins a server-relative path onto the instance base URL. Absolute URLs
/// pass through untouched.
pub fn resolve_url(instance_url: &str, path_or_url: &str) -> String {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        path_or_url.to_string()
    } else {
        format!("{}{}", instance_url.trim_end_matches('/'), path_or_url)
    }
}

/// Count label for the panel title. The API returns at most one page, so a
/// full page reads as "100+".
pub fn count_label(count: usize) -> String {
    if count >= PAGE_SIZE {
        format!("{PAGE_SIZE}+")
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_client::{
        BatchChange, BatchChangeState, Changeset, ChangesetCounts, ChangesetState, Namespace,
        Repository,
    };

    use crate::state::BatchChangeRef;

    fn batch_change(id: &str, name: &str, state: BatchChangeState) -> BatchChange {
        BatchChange {
            id: id.to_string(),
            name: name.to_string(),
            state,
            url: format!("/users/alice/batch-changes/{name}"),
            namespace: Namespace {
                id: "ns-1".to_string(),
                namespace_name: "alice".to_string(),
            },
            creator: None,
            changesets_stats: ChangesetCounts::default(),
            updated_at: "2026-08-20T14:03:00Z".to_string(),
        }
    }

    /// Loads items the way the app does, through the fetch lifecycle.
    fn load<T>(fetch: &mut crate::fetch::FetchState<T>, items: Vec<T>) {
        let ticket = fetch.begin_load();
        fetch.finish(ticket.epoch, Ok(items));
    }

    #[test]
    fn test_visible_rows_follow_the_filter() {
        let mut state = AppState::new("https://sourcegraph.example".to_string());
        load(
            &mut state.panel.batch_changes,
            vec![
                batch_change("bc-1", "update-ci", BatchChangeState::Open),
                batch_change("bc-2", "drop-python2", BatchChangeState::Closed),
            ],
        );

        assert_eq!(visible_rows(&state).len(), 2);

        state.panel.filter = "python".to_string();
        let rows = visible_rows(&state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "bc-2");

        // Lifecycle state is a keyword, so filtering on it works too.
        state.panel.filter = "closed".to_string();
        let rows = visible_rows(&state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "bc-2");
    }

    #[test]
    fn test_visible_rows_switch_with_the_screen() {
        let mut state = AppState::new("https://sourcegraph.example".to_string());
        load(
            &mut state.panel.batch_changes,
            vec![batch_change("bc-1", "update-ci", BatchChangeState::Open)],
        );
        state.panel.enter_changesets(BatchChangeRef {
            id: "bc-1".to_string(),
            namespace_id: "ns-1".to_string(),
            name: "update-ci".to_string(),
            title: "alice / update-ci".to_string(),
            url: "/users/alice/batch-changes/update-ci".to_string(),
        });
        load(
            &mut state.panel.changesets,
            vec![Changeset {
                id: "cs-1".to_string(),
                state: ChangesetState::Unpublished,
                review_state: None,
                external_id: None,
                external_url: None,
                repository: Repository {
                    name: "github.com/org/repo".to_string(),
                },
                updated_at: "2026-08-21T09:30:00Z".to_string(),
            }],
        );

        let rows = visible_rows(&state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "cs-1");
        assert_eq!(rows[0].title, "github.com/org/repo");
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url("https://sourcegraph.example", "/batch-changes/1"),
            "https://sourcegraph.example/batch-changes/1"
        );
        assert_eq!(
            resolve_url("https://sourcegraph.example/", "/batch-changes/1"),
            "https://sourcegraph.example/batch-changes/1"
        );
        assert_eq!(
            resolve_url("https://sourcegraph.example", "https://github.com/org/repo/pull/1"),
            "https://github.com/org/repo/pull/1"
        );
    }

    #[test]
    fn test_count_label_caps_at_page_size() {
        assert_eq!(count_label(0), "0");
        assert_eq!(count_label(42), "42");
        assert_eq!(count_label(PAGE_SIZE), "100+");
        assert_eq!(count_label(PAGE_SIZE + 7), "100+");
    }
}
