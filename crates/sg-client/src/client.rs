//! Batch changes client trait
//!
//! This module defines the core `BatchChangesClient` trait that all client
//! implementations must satisfy. The app talks only to this trait so tests
//! can substitute scripted implementations.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ClientResult;
use crate::types::{BatchChange, Changeset};

/// Page size requested from list endpoints. One page is all this client
/// reads; views cap their displayed counts accordingly.
pub const PAGE_SIZE: usize = 100;

/// Sourcegraph batch changes API client trait
///
/// Defines the interface for reading batch changes and changesets and for
/// publishing changesets. Implementations can be direct (hitting the API)
/// or scripted for tests.
///
/// Every call takes a `CancellationToken`. Implementations must stop work
/// promptly when it fires and return [`crate::ClientError::Cancelled`],
/// never a fabricated success or transport error.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use sg_client::{BatchChangesClient, ClientResult, BatchChange};
/// use tokio_util::sync::CancellationToken;
///
/// async fn list(client: &dyn BatchChangesClient) -> ClientResult<Vec<BatchChange>> {
///     client.fetch_batch_changes(&CancellationToken::new()).await
/// }
/// ```
#[async_trait]
pub trait BatchChangesClient: Send + Sync {
    /// Fetch the batch changes visible to the authenticated user
    ///
    /// # Arguments
    ///
    /// * `cancel` - Token that aborts the request when it fires
    ///
    /// # Returns
    ///
    /// Up to [`PAGE_SIZE`] batch changes in server order, or an error if
    /// the API call fails or is cancelled.
    async fn fetch_batch_changes(
        &self,
        cancel: &CancellationToken,
    ) -> ClientResult<Vec<BatchChange>>;

    /// Fetch the changesets of one batch change
    ///
    /// Batch changes are addressed by namespace and name rather than id;
    /// that is the lookup the API exposes.
    ///
    /// # Arguments
    ///
    /// * `cancel` - Token that aborts the request when it fires
    /// * `namespace_id` - GraphQL id of the owning namespace
    /// * `batch_change_name` - Name of the batch change within the namespace
    ///
    /// # Returns
    ///
    /// Up to [`PAGE_SIZE`] changesets in server order, or an error if the
    /// API call fails or is cancelled.
    async fn fetch_changesets(
        &self,
        cancel: &CancellationToken,
        namespace_id: &str,
        batch_change_name: &str,
    ) -> ClientResult<Vec<Changeset>>;

    /// Publish one changeset to its code host
    ///
    /// The server runs the same mutation for a first publish of an
    /// unpublished changeset and for a retry of a failed one.
    ///
    /// # Arguments
    ///
    /// * `cancel` - Token that aborts the request when it fires
    /// * `batch_change_id` - GraphQL id of the owning batch change
    /// * `changeset_id` - GraphQL id of the changeset to publish
    ///
    /// # Returns
    ///
    /// Ok(()) once the server accepted the publish, error on failure. The
    /// publish itself completes asynchronously on the server.
    async fn publish_changeset(
        &self,
        cancel: &CancellationToken,
        batch_change_id: &str,
        changeset_id: &str,
    ) -> ClientResult<()>;
}
