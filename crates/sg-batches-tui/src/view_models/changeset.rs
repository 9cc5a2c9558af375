//! Changeset list rows

use sg_client::{Changeset, ChangesetReviewState, ChangesetState};

use crate::state::BatchChangeRef;
use crate::view_models::resolve_url;
use crate::view_models::row::{Icon, ListRow, RowAction, Tint};

/// Projects one changeset into a display row. `parent` supplies the
/// fallback URL for changesets that are not on a code host yet.
pub fn changeset_row(cs: &Changeset, parent: &BatchChangeRef, instance_url: &str) -> ListRow {
    let (icon, tint, actions) = state_style(cs);
    let review = cs
        .review_state
        .map(|review| review.as_str().to_string())
        .unwrap_or_default();

    ListRow {
        id: cs.id.clone(),
        title: cs.repository.name.clone(),
        subtitle: subtitle(cs),
        icon,
        tint,
        accessory: None,
        keywords: vec![cs.state.as_str().to_string(), review],
        actions,
        url: canonical_url(cs, parent, instance_url),
    }
}

fn state_style(cs: &Changeset) -> (Icon, Tint, Vec<RowAction>) {
    match cs.state {
        ChangesetState::Open => {
            let icon = match cs.review_state {
                Some(ChangesetReviewState::Approved) => Icon::Check,
                Some(ChangesetReviewState::ChangesRequested) => Icon::XCircle,
                _ => Icon::Circle,
            };
            (icon, Tint::Green, Vec::new())
        }
        ChangesetState::Merged => (Icon::Check, Tint::Purple, Vec::new()),
        ChangesetState::Closed => (Icon::XCircle, Tint::Red, Vec::new()),
        ChangesetState::Failed => (Icon::Exclamation, Tint::Red, vec![RowAction::Retry]),
        ChangesetState::Unpublished => (Icon::Document, Tint::Plain, vec![RowAction::Publish]),
        ChangesetState::Processing | ChangesetState::Retrying => {
            (Icon::Clock, Tint::Plain, Vec::new())
        }
        ChangesetState::Unknown => (Icon::Circle, Tint::Plain, Vec::new()),
    }
}

/// Review verdict while open, `#{id} {state}` otherwise.
fn subtitle(cs: &Changeset) -> String {
    if cs.state == ChangesetState::Open {
        return cs
            .review_state
            .map(|review| review.as_str().to_string())
            .unwrap_or_default();
    }
    let label = cs.state.label();
    match &cs.external_id {
        Some(id) => format!("#{id} {label}"),
        None => label.to_string(),
    }
}

/// Code-host URL when published; otherwise the parent batch change
/// filtered down to this changeset's state.
fn canonical_url(cs: &Changeset, parent: &BatchChangeRef, instance_url: &str) -> String {
    match &cs.external_url {
        Some(external) => external.url.clone(),
        None => resolve_url(
            instance_url,
            &format!("{}?status={}", parent.url, cs.state.as_str()),
        ),
    }
}
