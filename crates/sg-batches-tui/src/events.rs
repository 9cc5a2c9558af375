//! App events and the dispatcher that delivers them
//!
//! Background tasks (fetches, publishes, the delayed refresh timer) finish
//! on the runtime's worker threads; their results travel back to the main
//! thread as `AppEvent`s over a channel and are applied between frames.

use std::sync::mpsc::Sender;

use sg_client::{BatchChange, Changeset, ClientResult};

use crate::remote::PublishRequest;

/// Completion events produced by background tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// The batch change list fetch finished.
    BatchChangesLoaded {
        epoch: u64,
        result: ClientResult<Vec<BatchChange>>,
    },
    /// The changeset list fetch of one batch change finished.
    ChangesetsLoaded {
        epoch: u64,
        result: ClientResult<Vec<Changeset>>,
    },
    /// A publish/retry mutation finished.
    PublishFinished {
        request: PublishRequest,
        result: ClientResult<()>,
    },
    /// The post-publish delay elapsed; the changeset list of this batch
    /// change should be refreshed if it is still on screen.
    ChangesetRefreshDue { batch_change_id: String },
}

/// Sends events from background tasks to the main loop
///
/// Cloneable so every spawned task carries its own sender. Dropped sends
/// (main loop already gone during shutdown) are logged, not fatal.
#[derive(Clone)]
pub struct Dispatcher {
    event_tx: Sender<AppEvent>,
}

impl Dispatcher {
    /// Create a new dispatcher around the main loop's event channel
    pub fn new(event_tx: Sender<AppEvent>) -> Self {
        Self { event_tx }
    }

    /// Dispatch an event to be applied by the main loop
    pub fn dispatch(&self, event: AppEvent) {
        if let Err(e) = self.event_tx.send(event) {
            log::error!("Dispatcher: failed to send event: {}", e);
        }
    }
}
