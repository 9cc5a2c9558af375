//! Data types for the Sourcegraph batch changes API
//!
//! These mirror the GraphQL schema shapes the client queries for. All state
//! enums carry an `Unknown` catch-all so a server that grows new states does
//! not break deserialization; rendering code treats `Unknown` as a neutral
//! "still in progress" style state.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a batch change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchChangeState {
    /// Created but not applied yet
    Draft,
    /// Applied and active
    Open,
    /// Closed by its author
    Closed,
    /// Any state this client does not know about
    #[serde(other)]
    Unknown,
}

impl BatchChangeState {
    /// Stable lowercase name for display and URL query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchChangeState::Draft => "draft",
            BatchChangeState::Open => "open",
            BatchChangeState::Closed => "closed",
            BatchChangeState::Unknown => "unknown",
        }
    }
}

/// Publication / merge lifecycle state of a changeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangesetState {
    /// Tracked by the batch change but not pushed to the code host yet
    Unpublished,
    /// A publish or sync operation is running
    Processing,
    /// A previously failed operation is being retried
    Retrying,
    /// Open on the code host
    Open,
    /// Closed on the code host without merging
    Closed,
    /// Merged on the code host
    Merged,
    /// The last operation on it failed
    Failed,
    /// Any state this client does not know about
    #[serde(other)]
    Unknown,
}

impl ChangesetState {
    /// Stable uppercase name, matching the wire value for known states.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangesetState::Unpublished => "UNPUBLISHED",
            ChangesetState::Processing => "PROCESSING",
            ChangesetState::Retrying => "RETRYING",
            ChangesetState::Open => "OPEN",
            ChangesetState::Closed => "CLOSED",
            ChangesetState::Merged => "MERGED",
            ChangesetState::Failed => "FAILED",
            ChangesetState::Unknown => "UNKNOWN",
        }
    }

    /// Lowercase name for display in subtitles.
    pub fn label(&self) -> &'static str {
        match self {
            ChangesetState::Unpublished => "unpublished",
            ChangesetState::Processing => "processing",
            ChangesetState::Retrying => "retrying",
            ChangesetState::Open => "open",
            ChangesetState::Closed => "closed",
            ChangesetState::Merged => "merged",
            ChangesetState::Failed => "failed",
            ChangesetState::Unknown => "unknown",
        }
    }
}

/// Aggregate review decision on an open changeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangesetReviewState {
    /// At least one approving review, no blocking ones
    Approved,
    /// A reviewer requested changes
    ChangesRequested,
    /// Review requested but not given yet
    Pending,
    /// Only non-blocking comments so far
    Commented,
    /// A previous review was dismissed
    Dismissed,
    /// Any state this client does not know about
    #[serde(other)]
    Unknown,
}

impl ChangesetReviewState {
    /// Stable lowercase name for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangesetReviewState::Approved => "approved",
            ChangesetReviewState::ChangesRequested => "changes requested",
            ChangesetReviewState::Pending => "pending",
            ChangesetReviewState::Commented => "commented",
            ChangesetReviewState::Dismissed => "dismissed",
            ChangesetReviewState::Unknown => "unknown",
        }
    }
}

/// Namespace (user or organization) a batch change lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    /// Opaque GraphQL node id
    pub id: String,
    /// Human-readable namespace name, e.g. a username or org name
    pub namespace_name: String,
}

/// Author of a batch change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    /// Optional full display name
    pub display_name: Option<String>,
    /// Account username, always present
    pub username: String,
}

/// Per-state changeset counts attached to a batch change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesetCounts {
    /// All changesets tracked by the batch change
    pub total: u32,
    /// Changesets open on their code host
    pub open: u32,
    /// Changesets closed without merging
    pub closed: u32,
    /// Changesets merged on their code host
    pub merged: u32,
    /// Changesets whose last operation failed
    pub failed: u32,
}

/// A batch change: a named collection of changesets spread over repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChange {
    /// Opaque GraphQL node id
    pub id: String,
    /// Name unique within the namespace
    pub name: String,
    /// Lifecycle state
    pub state: BatchChangeState,
    /// URL path of the batch change, relative to the instance root
    pub url: String,
    /// Owning namespace
    pub namespace: Namespace,
    /// Author, absent when the account was deleted
    pub creator: Option<Creator>,
    /// Aggregate changeset counts
    pub changesets_stats: ChangesetCounts,
    /// Last update time as reported by the server (RFC 3339)
    pub updated_at: String,
}

impl BatchChange {
    /// Preferred author name: display name when set, username otherwise,
    /// `None` for deleted accounts.
    pub fn creator_name(&self) -> Option<&str> {
        self.creator
            .as_ref()
            .map(|c| c.display_name.as_deref().unwrap_or(&c.username))
    }
}

/// Repository a changeset targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Repository name including the code host prefix
    pub name: String,
}

/// Link to the changeset on its code host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalUrl {
    /// Absolute URL on the code host
    pub url: String,
}

/// A changeset: one proposed change (pull/merge request) in one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changeset {
    /// Opaque GraphQL node id
    pub id: String,
    /// Publication / merge lifecycle state
    pub state: ChangesetState,
    /// Review decision, only meaningful while open
    pub review_state: Option<ChangesetReviewState>,
    /// Code-host-side id, e.g. a PR number; absent until published
    #[serde(rename = "externalID")]
    pub external_id: Option<String>,
    /// Code-host URL; absent until published
    #[serde(rename = "externalURL")]
    pub external_url: Option<ExternalUrl>,
    /// Repository the change targets
    pub repository: Repository,
    /// Last update time as reported by the server (RFC 3339)
    pub updated_at: String,
}
