//! Remote operations
//!
//! Owns the tokio runtime and spawns every background task: list fetches,
//! publish mutations and the delayed refresh that follows a successful
//! publish. Completions are reported through the [`Dispatcher`]; no task
//! ever touches app state directly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sg_client::{BatchChangesClient, CancellationToken};
use tokio::runtime::Runtime;

use crate::events::{AppEvent, Dispatcher};
use crate::fetch::FetchTicket;
use crate::state::BatchChangeRef;

/// Whether a publish call is a first publish or a retry of a failed one.
/// The server runs the same mutation either way; the distinction only
/// colors the messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishIntent {
    Publish,
    Retry,
}

impl PublishIntent {
    /// Title of the success notification.
    pub fn success_title(&self) -> &'static str {
        match self {
            PublishIntent::Publish => "Changeset submitted for publishing",
            PublishIntent::Retry => "Changeset submitted for retry",
        }
    }

    /// Title of the failure notification.
    pub fn error_title(&self) -> &'static str {
        match self {
            PublishIntent::Publish => "Failed to publish changeset",
            PublishIntent::Retry => "Failed to retry changeset",
        }
    }
}

/// One publish/retry mutation, carried through the event channel so the
/// completion handler can word its messages.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub batch_change_id: String,
    pub changeset_id: String,
    /// Repository name, for status messages
    pub repository: String,
    pub intent: PublishIntent,
}

impl PublishRequest {
    /// Status line shown while the mutation is running.
    pub fn running_message(&self) -> String {
        match self.intent {
            PublishIntent::Publish => format!("Publishing changeset for {}", self.repository),
            PublishIntent::Retry => format!("Retrying changeset for {}", self.repository),
        }
    }
}

/// Spawns background work on an owned runtime and reports completions
/// through the dispatcher.
pub struct RemoteOps {
    runtime: Runtime,
    client: Arc<dyn BatchChangesClient>,
    dispatcher: Dispatcher,
    publish_refresh_delay: Duration,
}

impl RemoteOps {
    pub fn new(
        client: Arc<dyn BatchChangesClient>,
        dispatcher: Dispatcher,
        publish_refresh_delay: Duration,
    ) -> anyhow::Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            runtime,
            client,
            dispatcher,
            publish_refresh_delay,
        })
    }

    /// Fetch the batch change list; the response carries the ticket's epoch
    /// so the main loop can drop it if the load was superseded.
    pub fn spawn_batch_changes_load(&self, ticket: FetchTicket) {
        let client = Arc::clone(&self.client);
        let dispatcher = self.dispatcher.clone();

        self.runtime.spawn(async move {
            let result = client.fetch_batch_changes(&ticket.cancel).await;
            dispatcher.dispatch(AppEvent::BatchChangesLoaded {
                epoch: ticket.epoch,
                result,
            });
        });
    }

    /// Fetch the changesets of one batch change.
    pub fn spawn_changesets_load(&self, ticket: FetchTicket, batch_change: BatchChangeRef) {
        let client = Arc::clone(&self.client);
        let dispatcher = self.dispatcher.clone();

        self.runtime.spawn(async move {
            let result = client
                .fetch_changesets(
                    &ticket.cancel,
                    &batch_change.namespace_id,
                    &batch_change.name,
                )
                .await;
            dispatcher.dispatch(AppEvent::ChangesetsLoaded {
                epoch: ticket.epoch,
                result,
            });
        });
    }

    /// Run a publish/retry mutation. The mutation gets a fresh cancellation
    /// token unrelated to any list fetch; superseding a list load must not
    /// abort a publish already under way. After a success the server still
    /// processes the publish asynchronously, so the follow-up refresh is
    /// delayed before it is announced.
    pub fn spawn_publish(&self, request: PublishRequest) {
        let client = Arc::clone(&self.client);
        let dispatcher = self.dispatcher.clone();
        let delay = self.publish_refresh_delay;

        self.runtime.spawn(async move {
            let cancel = CancellationToken::new();
            let result = client
                .publish_changeset(&cancel, &request.batch_change_id, &request.changeset_id)
                .await;

            let succeeded = result.is_ok();
            let batch_change_id = request.batch_change_id.clone();
            dispatcher.dispatch(AppEvent::PublishFinished { request, result });

            if succeeded {
                tokio::time::sleep(delay).await;
                dispatcher.dispatch(AppEvent::ChangesetRefreshDue { batch_change_id });
            }
        });
    }

    /// Open a URL in the system browser without blocking the UI thread.
    pub fn open_in_browser(&self, url: String) {
        log::info!("Opening {} in browser", url);
        self.runtime.spawn(crate::browser::open_url(url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchState;
    use async_trait::async_trait;
    use sg_client::{BatchChange, Changeset, ClientError, ClientResult};
    use std::sync::mpsc::{self, Receiver};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockClient {
        publish_calls: Arc<Mutex<usize>>,
        fail_publish: bool,
    }

    #[async_trait]
    impl BatchChangesClient for MockClient {
        async fn fetch_batch_changes(
            &self,
            _cancel: &CancellationToken,
        ) -> ClientResult<Vec<BatchChange>> {
            Ok(Vec::new())
        }

        async fn fetch_changesets(
            &self,
            _cancel: &CancellationToken,
            _namespace_id: &str,
            _batch_change_name: &str,
        ) -> ClientResult<Vec<Changeset>> {
            Ok(Vec::new())
        }

        async fn publish_changeset(
            &self,
            _cancel: &CancellationToken,
            _batch_change_id: &str,
            _changeset_id: &str,
        ) -> ClientResult<()> {
            *self.publish_calls.lock().unwrap() += 1;
            if self.fail_publish {
                Err(ClientError::Api("publish rejected".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn remote_with(client: MockClient, delay_ms: u64) -> (RemoteOps, Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let remote = RemoteOps::new(
            Arc::new(client),
            Dispatcher::new(tx),
            Duration::from_millis(delay_ms),
        )
        .unwrap();
        (remote, rx)
    }

    fn retry_request() -> PublishRequest {
        PublishRequest {
            batch_change_id: "bc-1".to_string(),
            changeset_id: "cs-1".to_string(),
            repository: "github.com/org/repo".to_string(),
            intent: PublishIntent::Retry,
        }
    }

    #[test]
    fn test_publish_success_schedules_exactly_one_delayed_refresh() {
        let calls = Arc::new(Mutex::new(0));
        let client = MockClient {
            publish_calls: Arc::clone(&calls),
            fail_publish: false,
        };
        let (remote, rx) = remote_with(client, 10);

        remote.spawn_publish(retry_request());

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        match first {
            AppEvent::PublishFinished { request, result } => {
                assert!(result.is_ok());
                assert_eq!(request.intent, PublishIntent::Retry);
            }
            other => panic!("expected PublishFinished, got {other:?}"),
        }

        let second = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        match second {
            AppEvent::ChangesetRefreshDue { batch_change_id } => {
                assert_eq!(batch_change_id, "bc-1");
            }
            other => panic!("expected ChangesetRefreshDue, got {other:?}"),
        }

        // One refresh, not a stream of them.
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_publish_failure_skips_the_refresh() {
        let client = MockClient {
            fail_publish: true,
            ..Default::default()
        };
        let (remote, rx) = remote_with(client, 10);

        remote.spawn_publish(retry_request());

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        match first {
            AppEvent::PublishFinished { result, .. } => assert!(result.is_err()),
            other => panic!("expected PublishFinished, got {other:?}"),
        }
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_batch_changes_load_reports_ticket_epoch() {
        let (remote, rx) = remote_with(MockClient::default(), 10);
        let mut state: FetchState<BatchChange> = FetchState::default();
        let ticket = state.begin_load();

        remote.spawn_batch_changes_load(ticket);

        match rx.recv_timeout(Duration::from_secs(2)).unwrap() {
            AppEvent::BatchChangesLoaded { epoch, result } => {
                assert_eq!(epoch, state.epoch());
                assert!(result.unwrap().is_empty());
            }
            other => panic!("expected BatchChangesLoaded, got {other:?}"),
        }
    }

    #[test]
    fn test_publish_messages_follow_intent() {
        let request = retry_request();
        assert_eq!(request.running_message(), "Retrying changeset for github.com/org/repo");
        assert_eq!(
            PublishIntent::Retry.success_title(),
            "Changeset submitted for retry"
        );
        assert_eq!(
            PublishIntent::Publish.success_title(),
            "Changeset submitted for publishing"
        );
        assert_eq!(
            PublishIntent::Publish.error_title(),
            "Failed to publish changeset"
        );
    }
}
