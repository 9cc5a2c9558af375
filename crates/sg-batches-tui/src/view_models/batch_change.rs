//! Batch change list rows

use chrono::{DateTime, Utc};
use sg_client::{BatchChange, BatchChangeState, ChangesetCounts};

use crate::relative_time;
use crate::view_models::resolve_url;
use crate::view_models::row::{Icon, ListRow, Tint};

/// Projects one batch change into a display row.
pub fn batch_change_row(bc: &BatchChange, instance_url: &str, now: DateTime<Utc>) -> ListRow {
    let (icon, tint) = state_style(bc.state);

    let creator = bc.creator_name().unwrap_or("unknown");
    let subtitle = match relative_time::humanize_at(&bc.updated_at, now) {
        Some(updated) => format!("by {creator}, updated {updated}"),
        None => format!("by {creator}"),
    };

    ListRow {
        id: bc.id.clone(),
        title: format!("{} / {}", bc.namespace.namespace_name, bc.name),
        subtitle,
        icon,
        tint,
        accessory: counts_summary(&bc.changesets_stats),
        keywords: vec![bc.state.as_str().to_string()],
        actions: Vec::new(),
        url: resolve_url(instance_url, &bc.url),
    }
}

fn state_style(state: BatchChangeState) -> (Icon, Tint) {
    match state {
        BatchChangeState::Open => (Icon::Circle, Tint::Green),
        BatchChangeState::Closed => (Icon::Check, Tint::Red),
        BatchChangeState::Draft => (Icon::Document, Tint::Plain),
        BatchChangeState::Unknown => (Icon::Circle, Tint::Plain),
    }
}

/// "merged / published / total" summary; nothing while no changesets exist.
fn counts_summary(counts: &ChangesetCounts) -> Option<String> {
    if counts.total == 0 {
        return None;
    }
    let published = counts.closed + counts.merged + counts.open;
    Some(format!("{} / {} / {}", counts.merged, published, counts.total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_client::{Creator, Namespace};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-25T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn batch_change() -> BatchChange {
        BatchChange {
            id: "QmF0Y2hDaGFuZ2U6MQ==".to_string(),
            name: "update-ci-images".to_string(),
            state: BatchChangeState::Open,
            url: "/users/alice/batch-changes/update-ci-images".to_string(),
            namespace: Namespace {
                id: "VXNlcjox".to_string(),
                namespace_name: "alice".to_string(),
            },
            creator: Some(Creator {
                display_name: Some("Alice Doe".to_string()),
                username: "alice".to_string(),
            }),
            changesets_stats: ChangesetCounts {
                total: 10,
                open: 3,
                closed: 2,
                merged: 5,
                failed: 0,
            },
            updated_at: "2026-08-25T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_open_batch_change_row() {
        let row = batch_change_row(&batch_change(), "https://sourcegraph.example", now());

        assert_eq!(row.title, "alice / update-ci-images");
        assert_eq!(row.subtitle, "by Alice Doe, updated 2h ago");
        assert_eq!(row.icon, Icon::Circle);
        assert_eq!(row.tint, Tint::Green);
        assert_eq!(row.keywords, vec!["open".to_string()]);
        assert!(row.actions.is_empty());
        assert_eq!(
            row.url,
            "https://sourcegraph.example/users/alice/batch-changes/update-ci-images"
        );
    }

    #[test]
    fn test_counts_summary_merged_published_total() {
        let row = batch_change_row(&batch_change(), "https://sourcegraph.example", now());
        assert_eq!(row.accessory.as_deref(), Some("5 / 10 / 10"));
    }

    #[test]
    fn test_no_summary_without_changesets() {
        let mut bc = batch_change();
        bc.changesets_stats = ChangesetCounts::default();
        let row = batch_change_row(&bc, "https://sourcegraph.example", now());
        assert_eq!(row.accessory, None);
    }

    #[test]
    fn test_state_styles() {
        let mut bc = batch_change();

        bc.state = BatchChangeState::Closed;
        let row = batch_change_row(&bc, "https://sourcegraph.example", now());
        assert_eq!((row.icon, row.tint), (Icon::Check, Tint::Red));

        bc.state = BatchChangeState::Draft;
        let row = batch_change_row(&bc, "https://sourcegraph.example", now());
        assert_eq!((row.icon, row.tint), (Icon::Document, Tint::Plain));

        bc.state = BatchChangeState::Unknown;
        let row = batch_change_row(&bc, "https://sourcegraph.example", now());
        assert_eq!((row.icon, row.tint), (Icon::Circle, Tint::Plain));
    }

    #[test]
    fn test_unparseable_timestamp_drops_the_time_part() {
        let mut bc = batch_change();
        bc.updated_at = String::new();
        let row = batch_change_row(&bc, "https://sourcegraph.example", now());
        assert_eq!(row.subtitle, "by Alice Doe");
    }

    #[test]
    fn test_deleted_creator_reads_as_unknown() {
        let mut bc = batch_change();
        bc.creator = None;
        let row = batch_change_row(&bc, "https://sourcegraph.example", now());
        assert_eq!(row.subtitle, "by unknown, updated 2h ago");
    }
}
