//! Sourcegraph batch changes API client
//!
//! This crate provides a trait-based client for the batch changes part of
//! the Sourcegraph GraphQL API. The app depends only on the trait, so tests
//! substitute scripted implementations for the HTTP one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            BatchChangesClient trait              │
//! │  - fetch_batch_changes()                         │
//! │  - fetch_changesets()                            │
//! │  - publish_changeset()                           │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!           ┌─────────────────────────┐
//!           │ HttpBatchChangesClient  │
//!           │ (GraphQL over HTTP)     │
//!           └─────────────────────────┘
//! ```
//!
//! Every trait method takes a `CancellationToken`; a fired token turns into
//! [`ClientError::Cancelled`], which callers treat as "forget this request"
//! rather than as a failure.
//!
//! # Example
//!
//! ```rust,no_run
//! use sg_client::{BatchChangesClient, HttpBatchChangesClient};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), sg_client::ClientError> {
//! let client = HttpBatchChangesClient::new("https://sourcegraph.example.com", "token")?;
//! let cancel = CancellationToken::new();
//! let batch_changes = client.fetch_batch_changes(&cancel).await?;
//! println!("{} batch changes", batch_changes.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod graphql;
pub mod http_client;
pub mod types;

pub use client::{BatchChangesClient, PAGE_SIZE};
pub use error::{ClientError, ClientResult};
pub use http_client::HttpBatchChangesClient;
pub use types::{
    BatchChange, BatchChangeState, Changeset, ChangesetCounts, ChangesetReviewState,
    ChangesetState, Creator, ExternalUrl, Namespace, Repository,
};

// Re-export the token type so consumers don't need tokio-util directly
pub use tokio_util::sync::CancellationToken;
